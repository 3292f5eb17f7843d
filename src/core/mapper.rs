use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::{Database, FieldSet, FieldValue, Filter, Model, Row};
use crate::utils::error::{DataMapperError, Result};
use crate::utils::validation::{self, Validate};

/// 把一個 model 型別綁定到資料表、欄位宣告與資料庫後端
pub struct Mapper<M: Model> {
    table: String,
    fields: FieldSet,
    database: Arc<dyn Database>,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Clone for Mapper<M> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            fields: self.fields.clone(),
            database: Arc::clone(&self.database),
            _model: PhantomData,
        }
    }
}

impl<M: Model> Mapper<M> {
    pub fn new(database: Arc<dyn Database>) -> Result<Self> {
        Self::with_fields(database, M::fields())
    }

    /// 欄位宣告與資料表名稱都要先通過驗證
    pub fn with_fields(database: Arc<dyn Database>, fields: FieldSet) -> Result<Self> {
        fields.validate()?;
        validation::validate_identifier(M::model_name())?;
        Ok(Self {
            table: M::model_name().to_string(),
            fields,
            database,
            _model: PhantomData,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn database(&self) -> &Arc<dyn Database> {
        &self.database
    }

    pub async fn table_exists(&self) -> Result<bool> {
        self.database.table_exists(&self.table).await
    }

    pub async fn create_table(&self) -> Result<()> {
        self.database.create_table(&self.table, &self.fields).await
    }

    /// 儲存一筆 model 實例
    pub async fn save(&self, instance: &M) -> Result<()> {
        // 1. 補上預設值並檢查每個欄位的型別
        let row = self.complete_row(instance.to_row())?;

        // 2. 資料表不存在時自動建立
        if !self.database.table_exists(&self.table).await? {
            tracing::debug!("Table '{}' does not exist yet, creating it", self.table);
            self.database.create_table(&self.table, &self.fields).await?;
        }

        // 3. 寫入資料列
        self.database.insert(&self.table, &self.fields, &row).await
    }

    /// 依條件查詢,每筆結果透過 from_row 還原成 model 實例
    pub async fn find(&self, filter: &Filter, limit: Option<usize>) -> Result<Vec<M>> {
        self.check_filter(filter)?;
        let rows = self
            .database
            .select(&self.table, &self.fields, filter, limit)
            .await?;
        rows.iter().map(M::from_row).collect()
    }

    /// 依條件刪除,回傳刪除的筆數
    pub async fn delete(&self, filter: &Filter) -> Result<u64> {
        self.check_filter(filter)?;
        self.database.delete(&self.table, filter).await
    }

    // 宣告過的欄位才能出現在 row 裡;沒給值的欄位用預設值,再沒有就是 NULL
    fn complete_row(&self, row: Row) -> Result<Row> {
        let mut completed = Row::new();
        for (name, spec) in self.fields.iter() {
            let value = match row.get(name) {
                Some(value) => value.clone(),
                None => spec.default.clone().unwrap_or(FieldValue::Null),
            };
            if !spec.accepts(&value) {
                return Err(DataMapperError::TypeMismatchError {
                    field: name.to_string(),
                    expected: spec.field_type.as_str().to_string(),
                    actual: value.type_name().to_string(),
                });
            }
            completed.set(name, value);
        }
        Ok(completed)
    }

    fn check_filter(&self, filter: &Filter) -> Result<()> {
        for (name, _) in filter.iter() {
            if !self.fields.contains(name) {
                return Err(DataMapperError::UnknownFieldError {
                    field: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

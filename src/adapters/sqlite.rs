use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Sqlite};
use tokio::sync::OnceCell;

use crate::core::sql::SqlDialect;
use crate::core::{
    Database, DatabaseProfile, DatabaseSystem, FieldSet, FieldType, FieldValue, Filter, Row,
};
use crate::utils::error::Result;

const DIALECT: SqlDialect = SqlDialect::Sqlite;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, sqlx::sqlite::SqliteArguments<'q>>;

/// SQLite 後端:連線池在第一次使用時才建立
pub struct SqliteDatabase {
    profile: DatabaseProfile,
    pool: OnceCell<Pool<Sqlite>>,
}

impl SqliteDatabase {
    pub fn new(profile: DatabaseProfile) -> Self {
        Self {
            profile,
            pool: OnceCell::new(),
        }
    }

    // 設定檔沒有給 db 路徑(或指定 :memory:)時使用記憶體資料庫
    fn file_path(&self) -> Option<&str> {
        self.profile
            .db
            .as_deref()
            .filter(|path| !path.is_empty() && *path != ":memory:")
    }

    async fn pool(&self) -> Result<&Pool<Sqlite>> {
        self.pool
            .get_or_try_init(|| async {
                match self.file_path() {
                    Some(path) => {
                        let url = format!("sqlite://{}", path);
                        tracing::debug!("Opening sqlite database at: {}", path);
                        let options =
                            SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
                        let pool = SqlitePoolOptions::new()
                            .max_connections(5)
                            .connect_with(options)
                            .await?;
                        Ok(pool)
                    }
                    None => {
                        // 記憶體資料庫只存在於單一連線上,連線池必須固定共用它
                        tracing::debug!("Opening in-memory sqlite database");
                        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
                        let pool = SqlitePoolOptions::new()
                            .max_connections(1)
                            .idle_timeout(None)
                            .max_lifetime(None)
                            .connect_with(options)
                            .await?;
                        Ok(pool)
                    }
                }
            })
            .await
    }
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: Option<&FieldValue>) -> SqliteQuery<'q> {
    match value {
        Some(FieldValue::Text(text)) => query.bind(text.clone()),
        Some(FieldValue::Integer(number)) => query.bind(*number),
        Some(FieldValue::Null) | None => query.bind(Option::<String>::None),
    }
}

fn bind_filter<'q>(mut query: SqliteQuery<'q>, filter: &Filter) -> SqliteQuery<'q> {
    for (_, value) in filter.iter() {
        // NULL 條件由 SQL 以 IS NULL 呈現,不佔位置參數
        if !value.is_null() {
            query = bind_value(query, Some(value));
        }
    }
    query
}

fn decode_row(row: &SqliteRow, fields: &FieldSet) -> Result<Row> {
    use sqlx::Row as _;

    let mut decoded = Row::new();
    for (name, spec) in fields.iter() {
        let value = match spec.field_type {
            FieldType::Text => row
                .try_get::<Option<String>, _>(name)?
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Null),
            FieldType::Integer => row
                .try_get::<Option<i64>, _>(name)?
                .map(FieldValue::Integer)
                .unwrap_or(FieldValue::Null),
        };
        decoded.set(name, value);
    }
    Ok(decoded)
}

#[async_trait::async_trait]
impl Database for SqliteDatabase {
    fn system(&self) -> DatabaseSystem {
        DatabaseSystem::Sqlite
    }

    fn profile(&self) -> &DatabaseProfile {
        &self.profile
    }

    async fn table_exists(&self, table: &str) -> Result<bool> {
        let pool = self.pool().await?;
        let sql = "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?";
        let found = sqlx::query(sql).bind(table).fetch_optional(pool).await?;
        Ok(found.is_some())
    }

    async fn create_table(&self, table: &str, fields: &FieldSet) -> Result<()> {
        let pool = self.pool().await?;
        let sql = DIALECT.create_table_sql(table, fields)?;
        tracing::debug!("Ensuring table '{}' exists", table);
        sqlx::query(&sql).execute(pool).await?;
        Ok(())
    }

    async fn insert(&self, table: &str, fields: &FieldSet, row: &Row) -> Result<()> {
        let pool = self.pool().await?;
        let sql = DIALECT.insert_sql(table, fields)?;
        let mut query = sqlx::query(&sql);
        for (name, _) in fields.iter() {
            query = bind_value(query, row.get(name));
        }
        query.execute(pool).await?;
        tracing::debug!("Inserted one row into '{}'", table);
        Ok(())
    }

    async fn select(
        &self,
        table: &str,
        fields: &FieldSet,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Row>> {
        let pool = self.pool().await?;
        let sql = DIALECT.select_sql(table, fields, filter, limit)?;
        let query = bind_filter(sqlx::query(&sql), filter);
        let rows = query.fetch_all(pool).await?;
        rows.iter().map(|row| decode_row(row, fields)).collect()
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<u64> {
        let pool = self.pool().await?;
        let sql = DIALECT.delete_sql(table, filter)?;
        let query = bind_filter(sqlx::query(&sql), filter);
        let result = query.execute(pool).await?;
        Ok(result.rows_affected())
    }
}

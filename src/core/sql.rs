use crate::core::{FieldSet, FieldType, Filter};
use crate::utils::error::Result;
use crate::utils::validation::validate_identifier;

/// SQL 方言:負責識別字引用、欄位型別對應與語句產生
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Sqlite,
    Mysql,
}

impl SqlDialect {
    pub fn quote_identifier(&self, name: &str) -> Result<String> {
        validate_identifier(name)?;
        match self {
            SqlDialect::Sqlite => Ok(format!("\"{}\"", name)),
            SqlDialect::Mysql => Ok(format!("`{}`", name)),
        }
    }

    pub fn column_type(&self, field_type: FieldType) -> &'static str {
        match (self, field_type) {
            (SqlDialect::Sqlite, FieldType::Text) => "TEXT",
            (SqlDialect::Sqlite, FieldType::Integer) => "INTEGER",
            (SqlDialect::Mysql, FieldType::Text) => "VARCHAR(255)",
            (SqlDialect::Mysql, FieldType::Integer) => "BIGINT",
        }
    }

    /// 產生 CREATE TABLE IF NOT EXISTS 語句,欄位順序依宣告順序
    pub fn create_table_sql(&self, table: &str, fields: &FieldSet) -> Result<String> {
        let mut columns = Vec::with_capacity(fields.len());
        for (name, spec) in fields.iter() {
            columns.push(format!(
                "{} {}",
                self.quote_identifier(name)?,
                self.column_type(spec.field_type)
            ));
        }
        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.quote_identifier(table)?,
            columns.join(", ")
        ))
    }

    /// 產生 INSERT 語句,每個欄位一個位置參數
    pub fn insert_sql(&self, table: &str, fields: &FieldSet) -> Result<String> {
        let mut columns = Vec::with_capacity(fields.len());
        for name in fields.names() {
            columns.push(self.quote_identifier(name)?);
        }
        let placeholders = vec!["?"; fields.len()];
        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_identifier(table)?,
            columns.join(", "),
            placeholders.join(", ")
        ))
    }

    /// 產生 SELECT 語句,包含 WHERE 條件與選擇性的 LIMIT
    pub fn select_sql(
        &self,
        table: &str,
        fields: &FieldSet,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<String> {
        let mut columns = Vec::with_capacity(fields.len());
        for name in fields.names() {
            columns.push(self.quote_identifier(name)?);
        }

        let mut sql = format!(
            "SELECT {} FROM {}",
            columns.join(", "),
            self.quote_identifier(table)?
        );
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clause(filter)?);
        }
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        Ok(sql)
    }

    /// 產生 DELETE 語句;沒有條件時刪除整張表的資料
    pub fn delete_sql(&self, table: &str, filter: &Filter) -> Result<String> {
        let mut sql = format!("DELETE FROM {}", self.quote_identifier(table)?);
        if !filter.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clause(filter)?);
        }
        Ok(sql)
    }

    // NULL 不能用等號比較,改為 IS NULL 且不綁定參數
    fn where_clause(&self, filter: &Filter) -> Result<String> {
        let mut conditions = Vec::with_capacity(filter.len());
        for (name, value) in filter.iter() {
            if value.is_null() {
                conditions.push(format!("{} IS NULL", self.quote_identifier(name)?));
            } else {
                conditions.push(format!("{} = ?", self.quote_identifier(name)?));
            }
        }
        Ok(conditions.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldSpec, FieldValue};

    fn team_fields() -> FieldSet {
        FieldSet::new()
            .field("name", FieldSpec::text())
            .field("token", FieldSpec::text())
            .field("score", FieldSpec::integer())
    }

    #[test]
    fn test_create_table_sqlite() {
        let sql = SqlDialect::Sqlite.create_table_sql("team", &team_fields()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS \"team\" (\"name\" TEXT, \"token\" TEXT, \"score\" INTEGER)"
        );
    }

    #[test]
    fn test_create_table_mysql() {
        let sql = SqlDialect::Mysql.create_table_sql("team", &team_fields()).unwrap();
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS `team` (`name` VARCHAR(255), `token` VARCHAR(255), `score` BIGINT)"
        );
    }

    #[test]
    fn test_insert_sql() {
        let sql = SqlDialect::Sqlite.insert_sql("team", &team_fields()).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO \"team\" (\"name\", \"token\", \"score\") VALUES (?, ?, ?)"
        );

        let sql = SqlDialect::Mysql.insert_sql("team", &team_fields()).unwrap();
        assert_eq!(
            sql,
            "INSERT INTO `team` (`name`, `token`, `score`) VALUES (?, ?, ?)"
        );
    }

    #[test]
    fn test_select_sql() {
        let filter = Filter::new().equals("name", "Team A");
        let sql = SqlDialect::Sqlite
            .select_sql("team", &team_fields(), &filter, Some(10))
            .unwrap();
        assert_eq!(
            sql,
            "SELECT \"name\", \"token\", \"score\" FROM \"team\" WHERE \"name\" = ? LIMIT 10"
        );
    }

    #[test]
    fn test_select_sql_without_filter_or_limit() {
        let sql = SqlDialect::Sqlite
            .select_sql("team", &team_fields(), &Filter::new(), None)
            .unwrap();
        assert_eq!(sql, "SELECT \"name\", \"token\", \"score\" FROM \"team\"");
    }

    #[test]
    fn test_select_sql_null_condition() {
        let filter = Filter::new().equals("token", FieldValue::Null).equals("score", 3i64);
        let sql = SqlDialect::Sqlite
            .select_sql("team", &team_fields(), &filter, None)
            .unwrap();
        assert_eq!(
            sql,
            "SELECT \"name\", \"token\", \"score\" FROM \"team\" WHERE \"token\" IS NULL AND \"score\" = ?"
        );
    }

    #[test]
    fn test_delete_sql() {
        let filter = Filter::new().equals("name", "Team A");
        let sql = SqlDialect::Mysql.delete_sql("team", &filter).unwrap();
        assert_eq!(sql, "DELETE FROM `team` WHERE `name` = ?");

        let sql = SqlDialect::Mysql.delete_sql("team", &Filter::new()).unwrap();
        assert_eq!(sql, "DELETE FROM `team`");
    }

    #[test]
    fn test_rendering_rejects_unsafe_identifiers() {
        assert!(SqlDialect::Sqlite
            .create_table_sql("team; DROP TABLE users", &team_fields())
            .is_err());
        assert!(SqlDialect::Sqlite
            .insert_sql("team", &FieldSet::new().field("bad name", FieldSpec::text()))
            .is_err());
    }
}

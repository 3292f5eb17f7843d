use crate::domain::model::{FieldSet, Filter, Row};
use crate::domain::profile::{DatabaseProfile, DatabaseSystem};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Model {
    fn model_name() -> &'static str;
    fn fields() -> FieldSet;
    fn to_row(&self) -> Row;
    fn from_row(row: &Row) -> Result<Self>
    where
        Self: Sized;
}

#[async_trait]
pub trait Database: Send + Sync {
    fn system(&self) -> DatabaseSystem;
    fn profile(&self) -> &DatabaseProfile;

    async fn table_exists(&self, table: &str) -> Result<bool>;
    async fn create_table(&self, table: &str, fields: &FieldSet) -> Result<()>;
    async fn insert(&self, table: &str, fields: &FieldSet, row: &Row) -> Result<()>;
    async fn select(
        &self,
        table: &str,
        fields: &FieldSet,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Row>>;
    async fn delete(&self, table: &str, filter: &Filter) -> Result<u64>;
}

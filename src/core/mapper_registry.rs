use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::core::registry::{DatabaseRegistry, ProfileSelection};
use crate::core::{Mapper, Model};
use crate::utils::error::{DataMapperError, Result};
use crate::utils::validation::Validate;

/// Mapper 註冊表:每個 model 型別對應一個 mapper
#[derive(Default)]
pub struct MapperRegistry {
    mappers: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    initialized: bool,
}

impl MapperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self) {
        self.clear();
        self.initialized = true;
    }

    pub fn clear(&mut self) {
        self.mappers.clear();
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// 註冊一個 model:先驗證欄位宣告,再解析資料庫,最後建立 mapper
    ///
    /// 同一個 model 型別重複註冊會取代原本的 mapper。
    pub fn register<M: Model + 'static>(
        &mut self,
        databases: &DatabaseRegistry,
        selection: ProfileSelection,
    ) -> Result<()> {
        // 1. 欄位宣告必須合法,順序在資料庫解析之前
        let fields = M::fields();
        fields.validate()?;

        // 2. 解析 selection 指到的資料庫
        let database = databases.database(selection)?;

        // 3. 建立並存入 mapper
        let mapper = Mapper::<M>::with_fields(database, fields)?;
        tracing::debug!("Registering mapper for model '{}'", M::model_name());
        self.mappers.insert(TypeId::of::<M>(), Box::new(mapper));
        Ok(())
    }

    pub fn mapper<M: Model + 'static>(&self) -> Result<Mapper<M>> {
        self.mappers
            .get(&TypeId::of::<M>())
            .and_then(|entry| entry.downcast_ref::<Mapper<M>>())
            .cloned()
            .ok_or_else(|| DataMapperError::MapperNotFoundError {
                model: M::model_name().to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Database, DatabaseProfile, DatabaseSystem, FieldSet, FieldSpec, Filter, Row,
    };
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Team {
        name: String,
    }

    impl Model for Team {
        fn model_name() -> &'static str {
            "team"
        }

        fn fields() -> FieldSet {
            FieldSet::new()
                .field("name", FieldSpec::text())
                .field("token", FieldSpec::text())
        }

        fn to_row(&self) -> Row {
            Row::new().with("name", self.name.clone())
        }

        fn from_row(row: &Row) -> Result<Self> {
            Ok(Self {
                name: row.text("name").unwrap_or_default().to_string(),
            })
        }
    }

    struct Nameless;

    impl Model for Nameless {
        fn model_name() -> &'static str {
            "nameless"
        }

        fn fields() -> FieldSet {
            FieldSet::new().field("", FieldSpec::text())
        }

        fn to_row(&self) -> Row {
            Row::new()
        }

        fn from_row(_row: &Row) -> Result<Self> {
            Ok(Self)
        }
    }

    struct MockDatabase {
        profile: DatabaseProfile,
    }

    #[async_trait::async_trait]
    impl Database for MockDatabase {
        fn system(&self) -> DatabaseSystem {
            DatabaseSystem::Couchdb
        }

        fn profile(&self) -> &DatabaseProfile {
            &self.profile
        }

        async fn table_exists(&self, _table: &str) -> Result<bool> {
            Ok(false)
        }

        async fn create_table(&self, _table: &str, _fields: &FieldSet) -> Result<()> {
            Ok(())
        }

        async fn insert(&self, _table: &str, _fields: &FieldSet, _row: &Row) -> Result<()> {
            Ok(())
        }

        async fn select(
            &self,
            _table: &str,
            _fields: &FieldSet,
            _filter: &Filter,
            _limit: Option<usize>,
        ) -> Result<Vec<Row>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _table: &str, _filter: &Filter) -> Result<u64> {
            Ok(0)
        }
    }

    fn database_registry() -> DatabaseRegistry {
        let mut registry = DatabaseRegistry::new();
        registry.initialize();
        registry.register_database(DatabaseSystem::Couchdb, |profile| {
            Arc::new(MockDatabase { profile })
        });
        let mut profile = DatabaseProfile::new("mock");
        profile.system = Some("couchdb".to_string());
        registry.register_profile(profile).unwrap();
        registry
    }

    #[test]
    fn test_lifecycle() {
        let mut registry = MapperRegistry::new();
        assert!(!registry.is_initialized());
        assert!(registry.is_empty());

        registry.initialize();
        assert!(registry.is_initialized());

        registry
            .register::<Team>(&database_registry(), ProfileSelection::default())
            .unwrap();
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(!registry.is_initialized());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let databases = database_registry();
        let mut registry = MapperRegistry::new();
        registry.initialize();

        registry
            .register::<Team>(&databases, ProfileSelection::Named("mock".to_string()))
            .unwrap();

        let mapper = registry.mapper::<Team>().unwrap();
        assert_eq!(mapper.table(), "team");
        assert_eq!(mapper.fields().len(), 2);
        assert_eq!(mapper.database().profile().name, "mock");
    }

    #[test]
    fn test_field_validation_precedes_database_resolution() {
        // 空的資料庫註冊表:若先解析資料庫會回報 NoProfilesRegisteredError
        let mut empty_databases = DatabaseRegistry::new();
        empty_databases.initialize();
        let mut registry = MapperRegistry::new();
        registry.initialize();

        let result = registry.register::<Nameless>(&empty_databases, ProfileSelection::default());
        assert!(matches!(result, Err(DataMapperError::EmptyFieldNameError)));
    }

    #[test]
    fn test_register_replaces_existing_mapper() {
        let databases = database_registry();
        let mut registry = MapperRegistry::new();
        registry.initialize();

        registry
            .register::<Team>(&databases, ProfileSelection::default())
            .unwrap();
        registry
            .register::<Team>(&databases, ProfileSelection::default())
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_unregistered_model() {
        let registry = MapperRegistry::new();
        assert!(matches!(
            registry.mapper::<Team>(),
            Err(DataMapperError::MapperNotFoundError { .. })
        ));
    }
}

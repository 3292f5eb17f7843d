//! A small data mapper for relational databases.
//!
//! Models declare their fields, mappers move model instances in and out of a
//! database, and registries keep track of which database systems and which
//! connection profiles are available.
//!
//! ```
//! use data_mapper::{DatabaseRegistry, DatabaseSystem, ProfileSelection, ProfilesFile};
//!
//! # fn main() -> data_mapper::Result<()> {
//! let profiles = ProfilesFile::from_toml_str(
//!     r#"
//!     [local]
//!     system = "sqlite"
//!     "#,
//! )?;
//!
//! let mut registry = DatabaseRegistry::new();
//! registry.initialize();
//! for profile in profiles.into_profiles() {
//!     registry.register_profile(profile)?;
//! }
//!
//! let database = registry.database(ProfileSelection::LastRegistered)?;
//! assert_eq!(database.system(), DatabaseSystem::Sqlite);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "mysql")]
pub use crate::adapters::mysql::MySqlDatabase;
#[cfg(feature = "sqlite")]
pub use crate::adapters::sqlite::SqliteDatabase;

pub use crate::config::profiles::ProfilesFile;
pub use crate::core::mapper::Mapper;
pub use crate::core::mapper_registry::MapperRegistry;
pub use crate::core::registry::{DatabaseRegistry, ProfileSelection};
pub use crate::core::sql::SqlDialect;
pub use crate::domain::model::{FieldSet, FieldSpec, FieldType, FieldValue, Filter, Row};
pub use crate::domain::ports::{Database, Model};
pub use crate::domain::profile::{DatabaseProfile, DatabaseSystem};
pub use crate::utils::error::{DataMapperError, Result};
pub use crate::utils::validation::Validate;

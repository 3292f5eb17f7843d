pub mod mapper;
pub mod mapper_registry;
pub mod registry;
pub mod sql;

pub use crate::domain::model::{FieldSet, FieldSpec, FieldType, FieldValue, Filter, Row};
pub use crate::domain::ports::{Database, Model};
pub use crate::domain::profile::{DatabaseProfile, DatabaseSystem};
pub use crate::utils::error::Result;

pub use crate::core::mapper::Mapper;
pub use crate::core::mapper_registry::MapperRegistry;
pub use crate::core::registry::{DatabaseRegistry, ProfileSelection};
pub use crate::core::sql::SqlDialect;

use std::fmt;

use crate::utils::error::{DataMapperError, Result};

/// Database systems the registry knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseSystem {
    Mysql,
    Postgresql,
    Sqlite,
    Mongodb,
    Couchdb,
}

impl DatabaseSystem {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" => Some(DatabaseSystem::Mysql),
            "postgresql" => Some(DatabaseSystem::Postgresql),
            "sqlite" => Some(DatabaseSystem::Sqlite),
            "mongodb" => Some(DatabaseSystem::Mongodb),
            "couchdb" => Some(DatabaseSystem::Couchdb),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseSystem::Mysql => "mysql",
            DatabaseSystem::Postgresql => "postgresql",
            DatabaseSystem::Sqlite => "sqlite",
            DatabaseSystem::Mongodb => "mongodb",
            DatabaseSystem::Couchdb => "couchdb",
        }
    }
}

impl fmt::Display for DatabaseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection metadata and credentials for one concrete database.
///
/// `system` stays a free string here; whether it names a supported system is
/// a property of the registry the profile is registered with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseProfile {
    pub name: String,
    pub system: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub db: Option<String>,
}

impl DatabaseProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn database_system(&self) -> Result<DatabaseSystem> {
        let system = self
            .system
            .as_deref()
            .map(str::trim)
            .filter(|system| !system.is_empty())
            .ok_or_else(|| DataMapperError::MissingSystemError {
                profile: self.name.clone(),
            })?;
        DatabaseSystem::from_name(system).ok_or_else(|| DataMapperError::UnsupportedSystemError {
            profile: self.name.clone(),
            system: system.to_string(),
        })
    }
}

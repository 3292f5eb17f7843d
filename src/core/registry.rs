use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::config::profiles::ProfilesFile;
use crate::core::{Database, DatabaseProfile, DatabaseSystem};
use crate::utils::error::{DataMapperError, Result};
use crate::utils::validation;

type DatabaseFactory = Box<dyn Fn(DatabaseProfile) -> Arc<dyn Database> + Send + Sync>;

/// 選擇要連線的 profile
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProfileSelection {
    /// 依名稱取用已註冊的 profile
    Named(String),
    /// 直接使用傳入的 profile,不經過註冊
    Profile(DatabaseProfile),
    /// 使用最後註冊的 profile
    #[default]
    LastRegistered,
}

/// 資料庫註冊表:管理各系統的後端建構器與已註冊的連線 profile
#[derive(Default)]
pub struct DatabaseRegistry {
    databases: HashMap<DatabaseSystem, DatabaseFactory>,
    profiles: Vec<DatabaseProfile>,
    initialized: bool,
}

impl DatabaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 清空註冊表並註冊編譯進來的內建後端
    pub fn initialize(&mut self) {
        self.clear();

        #[cfg(feature = "sqlite")]
        self.register_database(DatabaseSystem::Sqlite, |profile| {
            Arc::new(crate::adapters::sqlite::SqliteDatabase::new(profile))
        });

        #[cfg(feature = "mysql")]
        self.register_database(DatabaseSystem::Mysql, |profile| {
            Arc::new(crate::adapters::mysql::MySqlDatabase::new(profile))
        });

        self.initialized = true;
        tracing::debug!("Database registry initialized with {} backends", self.databases.len());
    }

    /// 初始化後載入設定檔,並註冊其中所有 profile
    pub fn with_profiles_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut registry = Self::new();
        registry.initialize();

        let profiles = ProfilesFile::from_file(path)?;
        for profile in profiles.into_profiles() {
            registry.register_profile(profile)?;
        }
        Ok(registry)
    }

    pub fn clear(&mut self) {
        self.databases.clear();
        self.profiles.clear();
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// 註冊某個系統的後端建構器;重複註冊會直接取代
    pub fn register_database<F>(&mut self, system: DatabaseSystem, factory: F)
    where
        F: Fn(DatabaseProfile) -> Arc<dyn Database> + Send + Sync + 'static,
    {
        tracing::debug!("Registering database backend for system '{}'", system);
        self.databases.insert(system, Box::new(factory));
    }

    pub fn supports(&self, system: DatabaseSystem) -> bool {
        self.databases.contains_key(&system)
    }

    /// 驗證後註冊 profile;名稱重複時原地取代,保留原本的註冊順序
    pub fn register_profile(&mut self, profile: DatabaseProfile) -> Result<()> {
        self.validate_profile(&profile)?;
        tracing::debug!("Registering database profile '{}'", profile.name);
        match self.profiles.iter_mut().find(|existing| existing.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
        Ok(())
    }

    /// 依序檢查:名稱不能為空、必須給定系統、系統必須有已註冊的後端
    pub fn validate_profile(&self, profile: &DatabaseProfile) -> Result<()> {
        validation::validate_profile_name(&profile.name)?;
        let system = profile.database_system()?;
        if !self.databases.contains_key(&system) {
            return Err(DataMapperError::UnsupportedSystemError {
                profile: profile.name.clone(),
                system: system.to_string(),
            });
        }
        Ok(())
    }

    pub fn profile(&self, name: &str) -> Result<&DatabaseProfile> {
        if name.trim().is_empty() {
            return Err(DataMapperError::EmptyProfileNameError);
        }
        self.profiles
            .iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| DataMapperError::UnknownProfileError {
                name: name.to_string(),
            })
    }

    pub fn first_profile(&self) -> Result<&DatabaseProfile> {
        self.profiles.first().ok_or(DataMapperError::NoProfilesRegisteredError)
    }

    pub fn last_profile(&self) -> Result<&DatabaseProfile> {
        self.profiles.last().ok_or(DataMapperError::NoProfilesRegisteredError)
    }

    pub fn profiles(&self) -> &[DatabaseProfile] {
        &self.profiles
    }

    /// 解析 selection 指到的 profile,並用對應系統的後端建構器開出資料庫
    pub fn database(&self, selection: ProfileSelection) -> Result<Arc<dyn Database>> {
        let profile = match selection {
            ProfileSelection::Named(name) => self.profile(&name)?.clone(),
            ProfileSelection::Profile(profile) => {
                // 未註冊的 profile 也要通過相同的驗證
                self.validate_profile(&profile)?;
                profile
            }
            ProfileSelection::LastRegistered => self.last_profile()?.clone(),
        };
        self.build_database(profile)
    }

    fn build_database(&self, profile: DatabaseProfile) -> Result<Arc<dyn Database>> {
        let system = profile.database_system()?;
        let factory = self
            .databases
            .get(&system)
            .ok_or_else(|| DataMapperError::UnsupportedSystemError {
                profile: profile.name.clone(),
                system: system.to_string(),
            })?;
        tracing::debug!("Opening {} database for profile '{}'", system, profile.name);
        Ok(factory(profile))
    }
}

use crate::domain::profile::DatabaseProfile;
use crate::utils::error::{DataMapperError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// 資料庫連線設定檔:一個 TOML table 對應一個 profile,table 名稱即 profile 名稱
#[derive(Debug, Clone, Default)]
pub struct ProfilesFile {
    profiles: Vec<DatabaseProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ProfileSection {
    system: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    db: Option<String>,
}

impl ProfileSection {
    fn into_profile(self, name: String) -> DatabaseProfile {
        DatabaseProfile {
            name,
            system: self.system,
            host: self.host,
            port: self.port,
            user: self.user,
            password: self.password,
            db: self.db,
        }
    }
}

impl ProfilesFile {
    /// 從 TOML 檔案載入資料庫設定檔
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let shown_path = path.display().to_string();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataMapperError::ProfilesFileNotFoundError { path: shown_path })
            }
            Err(error) => {
                return Err(DataMapperError::ProfilesFileUnreadableError {
                    path: shown_path,
                    reason: error.to_string(),
                })
            }
        };
        Self::parse(&content, &shown_path)
    }

    /// 從 TOML 字串解析資料庫設定檔
    ///
    /// ```
    /// use data_mapper::config::profiles::ProfilesFile;
    ///
    /// let profiles = ProfilesFile::from_toml_str(
    ///     r#"
    ///     [my-profile]
    ///     system = "mysql"
    ///     db = "test"
    ///     "#,
    /// )
    /// .unwrap();
    /// assert_eq!(profiles.profiles()[0].name, "my-profile");
    /// assert_eq!(profiles.profiles()[0].db.as_deref(), Some("test"));
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, source: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        let malformed = |reason: String| DataMapperError::ProfilesFileMalformedError {
            path: source.to_string(),
            reason,
        };

        // table 的文件順序決定 profile 的註冊順序,所以先讀出名稱順序再解析內容
        let table: toml::Table = toml::from_str(&processed_content)
            .map_err(|e| malformed(e.to_string()))?;
        let mut sections: HashMap<String, ProfileSection> = toml::from_str(&processed_content)
            .map_err(|e| malformed(e.to_string()))?;

        let mut profiles = Vec::with_capacity(table.len());
        for name in table.keys() {
            if let Some(section) = sections.remove(name) {
                profiles.push(section.into_profile(name.clone()));
            }
        }

        tracing::debug!("Loaded {} database profiles from {}", profiles.len(), source);
        Ok(Self { profiles })
    }

    /// 替換環境變數 (例如 ${DB_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn profiles(&self) -> &[DatabaseProfile] {
        &self.profiles
    }

    pub fn into_profiles(self) -> Vec<DatabaseProfile> {
        self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

//! Runtime configuration.
//!
//! # Responsibility
//! - Load `folio.toml` settings with a default for every field.
//! - Apply `FOLIO_*` environment overrides on top of file values.
//!
//! # Invariants
//! - A missing config file is not an error when no path was requested.
//! - Blank environment values are ignored.

use crate::loader::DEFAULT_DATA_SOURCE;
use crate::repo::cache_repo::DEFAULT_CACHE_KEY;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";
pub const DEFAULT_DB_FILE: &str = "folio-cache.sqlite3";
pub const DEFAULT_OUTPUT: &str = "public/index.html";
pub const DEFAULT_ADMIN_PASSWORD: &str = "HJPORT";

pub const ENV_DB_PATH: &str = "FOLIO_DB_PATH";
pub const ENV_DATA_SOURCE: &str = "FOLIO_DATA_SOURCE";
pub const ENV_ADMIN_PASSWORD: &str = "FOLIO_ADMIN_PASSWORD";
pub const ENV_LOG_DIR: &str = "FOLIO_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "FOLIO_LOG_LEVEL";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub data: DataConfig,
    pub cache: CacheConfig,
    pub site: SiteConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

/// Static data file location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path or `http(s)://` URL.
    pub source: String,
    /// No timeout when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATA_SOURCE.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl DataConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub db_path: PathBuf,
    pub key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Rendered page path.
    pub output: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared editor secret, compared case- and whitespace-insensitively.
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

/// File logging stays off unless `dir` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

impl FolioConfig {
    /// Parses TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration and applies process environment overrides.
    ///
    /// With `path == None`, `folio.toml` in the working directory is used
    /// when present and defaults otherwise.
    ///
    /// # Errors
    /// - `ConfigError::Io` when an explicitly requested file cannot be read.
    /// - `ConfigError::Parse` when the file is not valid config TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_str(&read_config(path)?)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_toml_str(&read_config(default_path)?)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Applies `FOLIO_*` overrides resolved through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        if let Some(db_path) = value(ENV_DB_PATH) {
            self.cache.db_path = PathBuf::from(db_path);
        }
        if let Some(source) = value(ENV_DATA_SOURCE) {
            self.data.source = source;
        }
        if let Some(password) = value(ENV_ADMIN_PASSWORD) {
            self.admin.password = password;
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            self.logging.dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            self.logging.level = Some(level);
        }
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, FolioConfig, DEFAULT_ADMIN_PASSWORD, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let config = FolioConfig::from_toml_str(
            r#"
            [data]
            source = "https://example.org/portfolio.json"
            request_timeout_secs = 10

            [site]
            output = "dist/index.html"
            "#,
        )
        .unwrap();
        assert_eq!(config.data.source, "https://example.org/portfolio.json");
        assert_eq!(config.data.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.site.output, PathBuf::from("dist/index.html"));
        assert_eq!(config.admin.password, DEFAULT_ADMIN_PASSWORD);
        assert_eq!(config.cache.key, "folio-portfolio-data");
        assert_eq!(config.logging.dir, None);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = FolioConfig::from_toml_str("[data\nsource = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn explicit_missing_file_is_an_io_error() {
        let err = FolioConfig::load(Some(Path::new("/definitely/missing/folio.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn overrides_replace_file_values_and_skip_blanks() {
        let env = HashMap::from([
            (ENV_DB_PATH, "/tmp/cache.sqlite3"),
            (ENV_LOG_LEVEL, "   "),
        ]);
        let mut config = FolioConfig::default();
        config.apply_overrides(|name| env.get(name).map(|value| value.to_string()));
        assert_eq!(config.cache.db_path, PathBuf::from("/tmp/cache.sqlite3"));
        assert_eq!(config.logging.level, None);
    }
}

use crate::domain::SpendingLimit;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "shoplist";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("spending limit {0} is negative")]
    NegativeLimit(Decimal),
}

/// Settings read from `config.toml`.
///
/// ```toml
/// spending_limit = 25
/// data_dir = "/home/me/.local/share/shoplist"
/// email_recipient = "me@example.com"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub spending_limit: Decimal,
    pub data_dir: Option<PathBuf>,
    pub email_recipient: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spending_limit: SpendingLimit::DEFAULT.amount(),
            data_dir: None,
            email_recipient: None,
        }
    }
}

impl Config {
    /// Platform location of the config file, e.g. `~/.config/shoplist/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads configuration from `path`, or from [`Config::default_path`].
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if !required && e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spending_limit.is_sign_negative() && !self.spending_limit.is_zero() {
            return Err(ConfigError::NegativeLimit(self.spending_limit));
        }
        Ok(())
    }

    pub fn spending_limit(&self) -> SpendingLimit {
        SpendingLimit::new(self.spending_limit)
    }

    /// Directory holding the list snapshot. Falls back to the working
    /// directory when the platform has no data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.spending_limit, Decimal::TEN);
        assert_eq!(config.spending_limit(), SpendingLimit::DEFAULT);
        assert!(config.email_recipient.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse("spending_limit = 25.5\n").unwrap();
        assert_eq!(config.spending_limit, Decimal::new(255, 1));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let config = Config::parse(
            "spending_limit = 40\ndata_dir = \"/tmp/lists\"\nemail_recipient = \"me@example.com\"\n",
        )
        .unwrap();
        assert_eq!(config.spending_limit, Decimal::new(40, 0));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/lists"));
        assert_eq!(config.email_recipient.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("limit = 3\n").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "spending_limit = 12\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.spending_limit, Decimal::new(12, 0));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_rejects_negative_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "spending_limit = -5\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::NegativeLimit(_))));
    }
}

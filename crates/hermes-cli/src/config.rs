//! `config.cfg`: JSON settings read at startup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.cfg";

/// Module directory written into a generated config.
pub const DEFAULT_MODULE_PATH: &str = "modules";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    /// Directory scanned for `*.hs` module files. Empty disables user modules.
    pub module_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            module_path: DEFAULT_MODULE_PATH.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot write config '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How [`load_or_create`] obtained the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Loaded,
    Generated,
}

impl Config {
    /// The configured module directory, if any.
    pub fn module_dir(&self) -> Option<PathBuf> {
        let trimmed = self.module_path.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        let text = serde_json::to_string_pretty(self)
            .map_err(|err| write_err(io::Error::new(io::ErrorKind::InvalidData, err)))?;
        fs::write(path, text + "\n").map_err(write_err)
    }
}

/// Load `path`, or write and return the default config if it does not exist.
/// A file that exists but does not parse is an error.
pub fn load_or_create(path: &Path) -> Result<(Config, ConfigSource), ConfigError> {
    if path.exists() {
        return Ok((Config::load(path)?, ConfigSource::Loaded));
    }
    let config = Config::default();
    config.save(path)?;
    Ok((config, ConfigSource::Generated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hermes-cli-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_generates_default_when_missing() {
        let dir = scratch("generate");
        let path = dir.join(DEFAULT_CONFIG_FILE);

        let (config, source) = load_or_create(&path).unwrap();
        assert_eq!(source, ConfigSource::Generated);
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let (again, source) = load_or_create(&path).unwrap();
        assert_eq!(source, ConfigSource::Loaded);
        assert_eq!(again, config);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_loads_existing_file() {
        let dir = scratch("load");
        let path = dir.join("custom.cfg");
        fs::write(&path, r#"{"version": "0.0.7", "module_path": "lib"}"#).unwrap();

        let (config, _) = load_or_create(&path).unwrap();
        assert_eq!(config.version, "0.0.7");
        assert_eq!(config.module_dir(), Some(PathBuf::from("lib")));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = scratch("malformed");
        let path = dir.join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "version = 1").unwrap();

        let err = load_or_create(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("malformed config"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_module_path_disables_modules() {
        let config = Config {
            version: "1".into(),
            module_path: "  ".into(),
        };
        assert_eq!(config.module_dir(), None);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["module_path"], "modules");
        assert!(json["version"].is_string());
    }
}

//! Configuration management for Springfield
//!
//! Values are layered into a [`ConfigManager`]: built-in defaults, then a
//! configuration file (JSON, TOML or `.env`), then an optional `.env` file,
//! then prefixed environment variables. The merged view deserializes into typed settings such as
//! [`L10nSettings`] and is validated before use.
//!
//! ```no_run
//! use springfield_config::*;
//! use std::path::Path;
//!
//! let settings: L10nSettings = ConfigManager::with_prefix(L10N_ENV_PREFIX)
//!     .load_layered(Some(Path::new("config/l10n.toml")), Some(Path::new(".env")))?
//!     .load_validated()?;
//! # Ok::<(), ConfigError>(())
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::L10nSettings;
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Environment prefix for the locale settings (`SPRINGFIELD_L10N_DEFAULT_LANGUAGE`, ...)
pub const L10N_ENV_PREFIX: &str = "SPRINGFIELD_L10N";

/// Layered key/value configuration store
#[derive(Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager that only reads `PREFIX_*` environment variables
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Merge in the process environment
    pub fn load_env(&self) -> &Self {
        let vars = EnvLoader::new(self.env_prefix.clone()).load();
        self.merge_strings(vars);
        self
    }

    /// Merge in variables from a `.env` file without touching the process environment.
    ///
    /// The file is read as `.env` whatever its name, keys filtered by the prefix.
    pub fn load_dotenv(&self, path: impl AsRef<Path>) -> Result<&Self> {
        let data = ConfigLoader::new(FileFormat::Env)
            .env_prefix(self.env_prefix.clone())
            .load_file(path)?;
        self.merge_value(data);
        Ok(self)
    }

    /// Merge in a configuration file, detecting the format from its extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<&Self> {
        let path = path.as_ref();
        let data = ConfigLoader::auto(path)?
            .env_prefix(self.env_prefix.clone())
            .load_file(path)?;
        self.merge_value(data);
        Ok(self)
    }

    /// Settings file, then `.env` file, then the process environment.
    ///
    /// Later sources win, so real environment variables override a `.env`
    /// file the way `dotenvy` itself never overwrites them.
    pub fn load_layered(&self, file: Option<&Path>, dotenv: Option<&Path>) -> Result<&Self> {
        if let Some(path) = file {
            self.load_file(path)?;
        }
        if let Some(path) = dotenv {
            self.load_dotenv(path)?;
        }
        Ok(self.load_env())
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value =
            serde_json::to_value(value).map_err(|e| ConfigError::Deserialization(e.to_string()))?;
        self.config.write().insert(key.to_string(), json_value);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.config.read();
        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone()).map_err(|e| ConfigError::Deserialization(e.to_string()))
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.config.read().keys().cloned().collect()
    }

    /// Deserialize the merged view into `T` and validate it
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let object: serde_json::Map<String, Value> = self
            .config
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let validated: T = serde_json::from_value(Value::Object(object))
            .map_err(|e| ConfigError::Deserialization(e.to_string()))?;
        validated.validate()?;

        tracing::debug!(keys = ?self.keys(), "configuration loaded");
        Ok(validated)
    }

    fn merge_value(&self, data: Value) {
        if let Value::Object(map) = data {
            let mut config = self.config.write();
            for (key, value) in map {
                config.insert(key, value);
            }
        }
    }

    fn merge_strings(&self, vars: HashMap<String, String>) {
        let mut config = self.config.write();
        for (key, value) in vars {
            config.insert(key, Value::String(value));
        }
    }
}

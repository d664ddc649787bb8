//! Configuration file loaders

use crate::{ConfigError, EnvLoader, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    /// `KEY=value` lines, as in a `.env` file
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",
            FileFormat::Toml => "TOML",
            FileFormat::Env => "env",
        }
    }
}

/// Reads one configuration file into a flat JSON object.
///
/// `.env` content is read with `dotenvy` and its keys go through
/// [`EnvLoader`], so a prefixed loader keeps only `PREFIX_*` entries exactly
/// like the process environment does.
pub struct ConfigLoader {
    format: FileFormat,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self {
            format,
            env_prefix: None,
        }
    }

    /// Prefix applied to `.env` keys
    pub fn env_prefix(mut self, prefix: Option<String>) -> Self {
        self.env_prefix = prefix;
        self
    }

    /// Pick the format from the file extension (`settings.toml`, `l10n.json`, `.env`).
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .or_else(|| {
                // ".env" has no extension, only a file name
                path.file_name()
                    .and_then(|s| s.to_str())
                    .and_then(|name| name.strip_prefix('.'))
            })
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        FileFormat::from_extension(ext)
            .map(Self::new)
            .ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_string()))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        self.parse(&content)
    }

    /// Parse configuration text. The result is always a JSON object.
    pub fn parse(&self, content: &str) -> Result<Value> {
        let value: Value = match self.format {
            FileFormat::Json => serde_json::from_str(content).map_err(|e| self.parse_error(e))?,
            FileFormat::Toml => toml::from_str(content).map_err(|e| self.parse_error(e))?,
            FileFormat::Env => self.parse_env(content)?,
        };

        if !value.is_object() {
            return Err(ConfigError::Parse {
                format: self.format.name(),
                message: "top level must be a table/object".to_string(),
            });
        }
        Ok(value)
    }

    fn parse_env(&self, content: &str) -> Result<Value> {
        let pairs = dotenvy::from_read_iter(content.as_bytes())
            .collect::<std::result::Result<Vec<(String, String)>, _>>()
            .map_err(|e| ConfigError::Dotenv(e.to_string()))?;

        let vars = EnvLoader::new(self.env_prefix.clone()).load_from(pairs);
        Ok(Value::Object(
            vars.into_iter().map(|(k, v)| (k, Value::String(v))).collect(),
        ))
    }

    fn parse_error(&self, e: impl std::fmt::Display) -> ConfigError {
        ConfigError::Parse {
            format: self.format.name(),
            message: e.to_string(),
        }
    }
}

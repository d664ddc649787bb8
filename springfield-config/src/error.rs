//! Error types for configuration loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to load configuration from {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("{format} parse error: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("Invalid language tag {tag:?} in {field}")]
    InvalidLanguageTag { field: &'static str, tag: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Failed to read .env file: {0}")]
    Dotenv(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

//! Error types for locale resolution
//!
//! Request-time conditions (`UnknownLocaleTag` through `CatalogUnavailable`)
//! are produced by the lower-level `try_*` functions and recovered locally by
//! the pipeline. Only `Config` escapes, and only at startup.

use springfield_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum L10nError {
    /// The tag does not map to any site language
    #[error("Unknown locale tag: {0:?}")]
    UnknownLocaleTag(String),

    /// The page has no locale it can be served in
    #[error("No available translations")]
    NoAvailableTranslations,

    /// The page exists but every translation is an alias or unpublished
    #[error("Only alias or draft translations exist")]
    AliasOrDraftOnly,

    /// The page store could not be read
    #[error("Translation catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, L10nError>;

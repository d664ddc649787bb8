//! Springfield - locale-aware request handling for the Firefox marketing site
//!
//! Re-exports the workspace crates under one name:
//!
//! - [`l10n`]: tag normalization, Accept-Language, path splitting, catalogs
//!   and the redirect decision
//! - [`config`]: layered settings
//! - [`metrics`]: the `locale.redirect` counter
//! - [`log`]: tracing setup (feature `log`)
//!
//! ```
//! use springfield::prelude::*;
//! use std::sync::Arc;
//!
//! let config = Arc::new(springfield::load_site_config(None, None)?);
//! let pipeline = LocalePipeline::new(config.clone(), Arc::new(SiteCatalog::new(config)));
//!
//! let dispatch = pipeline.handle(&RequestFingerprint::get("/robots.txt"));
//! assert!(matches!(dispatch, Dispatch::Serve(_)));
//! # Ok::<(), springfield::l10n::L10nError>(())
//! ```

pub use springfield_config as config;
pub use springfield_l10n as l10n;
pub use springfield_metrics as metrics;

#[cfg(feature = "log")]
pub use springfield_log as log;

pub use springfield_l10n::*;

use springfield_config::{ConfigManager, L10N_ENV_PREFIX, L10nSettings};
use std::path::Path;

/// Load locale settings (defaults, then `file`, then `dotenv`, then
/// `SPRINGFIELD_L10N_*`) and derive the site lookup tables from them.
pub fn load_site_config(file: Option<&Path>, dotenv: Option<&Path>) -> l10n::Result<SiteLocaleConfig> {
    let manager = ConfigManager::with_prefix(L10N_ENV_PREFIX);
    manager.load_layered(file, dotenv)?;
    site_config_from(&manager)
}

/// Derive the site config from an already populated manager
pub fn site_config_from(manager: &ConfigManager) -> l10n::Result<SiteLocaleConfig> {
    let settings: L10nSettings = manager.load_validated()?;
    SiteLocaleConfig::from_settings(&settings)
}

// Prelude for common imports
pub mod prelude {
    pub use springfield_config::{ConfigManager, L10nSettings};
    pub use springfield_l10n::prelude::*;
    pub use springfield_metrics::{MetricsSink, PrometheusSink, REDIRECT_METRIC};
}

//! Locale resolution for Springfield
//!
//! Decides, for every request path, which language variant of a page to
//! serve and when to redirect:
//!
//! - **Normalization**: raw tags to the site's canonical case ([`normalize`])
//! - **Accept-Language**: quality-ordered candidates ([`parse_accept_language`])
//! - **Paths**: locale prefix, remainder, canonical rewrite ([`split_path`])
//! - **Catalog**: locales a template or CMS page exists in ([`catalog`])
//! - **Decision**: serve, redirect or 404 ([`decide`], [`LocalePipeline`])
//!
//! # Quick Start
//!
//! ```
//! use springfield_config::L10nSettings;
//! use springfield_l10n::*;
//! use std::sync::Arc;
//!
//! let config = Arc::new(SiteLocaleConfig::from_settings(&L10nSettings::default())?);
//! let templates = TemplateCatalog::new(config.clone(), Arc::new(InMemoryActivation::new()))
//!     .route("/download/", TemplateSpec::new("firefox/download.html").active_locales(["en-US", "fr"]));
//! let catalog = SiteCatalog::new(config.clone()).with_templates(templates);
//!
//! let pipeline = LocalePipeline::new(config, Arc::new(catalog));
//! let request = RequestFingerprint::get("/download/").with_accept_language("fr-FR,en;q=0.5");
//!
//! assert_eq!(
//!     pipeline.handle(&request),
//!     Dispatch::Redirect { location: "/fr/download/".to_string() }
//! );
//! # Ok::<(), L10nError>(())
//! ```

mod accept;
pub mod catalog;
mod config;
mod decision;
mod descriptor;
mod error;
pub mod layer;
mod negotiate;
mod normalize;
mod path;
mod pipeline;
mod request;
pub mod response;
mod tag;

pub use accept::{AcceptLanguage, accept_language_candidates, parse_accept_language};
pub use catalog::{
    ActiveLocaleResolver, CatalogError, CmsCatalog, FtlActivation, InMemoryActivation,
    InMemoryPageStore, LocaleStore, PageId, PageRecord, PageStore, SiteCatalog, TemplateCatalog,
    TemplateSpec,
};
pub use config::SiteLocaleConfig;
pub use decision::{LocaleDecision, decide};
pub use descriptor::{PageDescriptor, PageDescriptorProvider, PageKind};
pub use error::{L10nError, Result};
pub use layer::{LocaleLayer, LocaleService};
pub use negotiate::{best_translation_or_default, best_translation_or_none};
pub use normalize::{normalize, try_normalize};
pub use path::{PathSplit, split_path};
pub use pipeline::{ActiveLocale, Dispatch, LocalePipeline};
pub use request::RequestFingerprint;
pub use tag::{LanguageTag, LocaleSet};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ActiveLocale, CmsCatalog, Dispatch, L10nError, LanguageTag, LocaleDecision, LocaleLayer,
        LocalePipeline, LocaleSet, PageDescriptor, PageDescriptorProvider, PageKind,
        RequestFingerprint, SiteCatalog, SiteLocaleConfig, TemplateCatalog, TemplateSpec, decide,
    };
}

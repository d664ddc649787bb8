//! Translation catalog
//!
//! Answers "in which locales does the requested page exist?". Templates
//! declare their locales; CMS pages derive them from published translations.

pub mod cms;
pub mod store;
pub mod template;

pub use cms::{CatalogError, CmsCatalog, InMemoryPageStore, PageId, PageRecord, PageStore};
pub use store::{ActiveLocaleResolver, LocaleStore};
pub use template::{FtlActivation, InMemoryActivation, TemplateCatalog, TemplateSpec};

use crate::{PageDescriptor, PageDescriptorProvider, RequestFingerprint, SiteLocaleConfig, split_path};
use std::sync::Arc;

/// Describes any site path: reserved paths first, then routed templates,
/// then CMS pages. Anything else is a template available nowhere.
pub struct SiteCatalog {
    config: Arc<SiteLocaleConfig>,
    templates: Option<TemplateCatalog>,
    cms: Option<CmsCatalog>,
}

impl SiteCatalog {
    pub fn new(config: Arc<SiteLocaleConfig>) -> Self {
        Self {
            config,
            templates: None,
            cms: None,
        }
    }

    pub fn with_templates(mut self, templates: TemplateCatalog) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_cms(mut self, cms: CmsCatalog) -> Self {
        self.cms = Some(cms);
        self
    }
}

impl PageDescriptorProvider for SiteCatalog {
    fn describe(&self, request: &RequestFingerprint) -> PageDescriptor {
        let split = split_path(&self.config, &request.raw_path);

        if split.nonlocale {
            return PageDescriptor::nonlocale(split.remainder);
        }
        if split.locale_ignored {
            return PageDescriptor::locale_ignored(split.remainder);
        }

        if let Some(page) = self.templates.as_ref().and_then(|t| t.describe_path(&split.remainder)) {
            return page;
        }
        if let Some(page) = self.cms.as_ref().and_then(|c| c.describe_path(&request.raw_path)) {
            return page;
        }

        tracing::debug!(path = %request.raw_path, "no template or CMS page for path");
        PageDescriptor::missing(split.remainder)
    }
}

//! Locales of statically declared pages

use crate::{LocaleSet, PageDescriptor, SiteLocaleConfig};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Which locales have a translation file switched on.
///
/// `None` means the file is not tracked and restricts nothing.
pub trait FtlActivation: Send + Sync {
    fn active_locales(&self, file: &str) -> Option<LocaleSet>;
}

/// Map-backed [`FtlActivation`]
#[derive(Debug, Default)]
pub struct InMemoryActivation {
    files: RwLock<HashMap<String, LocaleSet>>,
}

impl InMemoryActivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, file: impl Into<String>, locales: LocaleSet) {
        self.files.write().insert(file.into(), locales);
    }

    pub fn with_file(self, file: impl Into<String>, locales: LocaleSet) -> Self {
        self.set(file, locales);
        self
    }
}

impl FtlActivation for InMemoryActivation {
    fn active_locales(&self, file: &str) -> Option<LocaleSet> {
        self.files.read().get(file).cloned()
    }
}

/// A page template and its locale declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSpec {
    pub name: String,
    /// Declared locales; all prod languages when `None`
    pub active_locales: Option<LocaleSet>,
    /// Translation files that must be active for a locale to be served
    pub activation_files: Vec<String>,
}

impl TemplateSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn active_locales<I, T>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<crate::LanguageTag>,
    {
        self.active_locales = Some(locales.into_iter().collect());
        self
    }

    pub fn activation_files<I, T>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.activation_files = files.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone)]
struct TemplateRoute {
    spec: TemplateSpec,
    add_active_locales: Option<LocaleSet>,
}

/// Templates keyed by the path they are served at (without locale)
pub struct TemplateCatalog {
    config: Arc<SiteLocaleConfig>,
    activation: Arc<dyn FtlActivation>,
    routes: HashMap<String, TemplateRoute>,
}

impl TemplateCatalog {
    pub fn new(config: Arc<SiteLocaleConfig>, activation: Arc<dyn FtlActivation>) -> Self {
        Self {
            config,
            activation,
            routes: HashMap::new(),
        }
    }

    pub fn route(mut self, path: impl Into<String>, spec: TemplateSpec) -> Self {
        self.routes.insert(
            path.into(),
            TemplateRoute {
                spec,
                add_active_locales: None,
            },
        );
        self
    }

    /// Route whose view always adds `add_active_locales` on top of the declaration
    pub fn route_with_locales(
        mut self,
        path: impl Into<String>,
        spec: TemplateSpec,
        add_active_locales: LocaleSet,
    ) -> Self {
        self.routes.insert(
            path.into(),
            TemplateRoute {
                spec,
                add_active_locales: Some(add_active_locales),
            },
        );
        self
    }

    /// `(declared or prod) ∩ active(file)... ∪ add_active_locales`.
    ///
    /// The default language always counts as active.
    pub fn available_locales(&self, spec: &TemplateSpec, add_active_locales: Option<&LocaleSet>) -> LocaleSet {
        let mut locales = spec
            .active_locales
            .clone()
            .unwrap_or_else(|| self.config.prod_languages().clone());

        let default = self.config.default_language();
        for file in &spec.activation_files {
            if let Some(active) = self.activation.active_locales(file) {
                locales.retain(|tag| tag == default || active.contains(tag.as_str()));
            }
        }

        if let Some(extra) = add_active_locales {
            locales.extend(extra.iter().cloned());
        }
        locales
    }

    /// Descriptor for a path without locale, if a template is routed there
    pub fn describe_path(&self, remainder: &str) -> Option<PageDescriptor> {
        let route = self.routes.get(remainder)?;
        let locales = self.available_locales(&route.spec, route.add_active_locales.as_ref());
        Some(PageDescriptor::template(locales, remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use springfield_config::L10nSettings;

    fn config() -> Arc<SiteLocaleConfig> {
        Arc::new(SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap())
    }

    fn set(tags: &[&str]) -> LocaleSet {
        tags.iter().copied().collect()
    }

    #[test]
    fn test_declared_locales_verbatim() {
        let catalog = TemplateCatalog::new(config(), Arc::new(InMemoryActivation::new()));
        let spec = TemplateSpec::new("firefox/download.html").active_locales(["en-US", "en-GB", "fr", "es-ES"]);

        assert_eq!(
            catalog.available_locales(&spec, None).to_vec(),
            vec!["en-US", "en-GB", "fr", "es-ES"]
        );
    }

    #[test]
    fn test_undeclared_uses_prod_languages() {
        let config = config();
        let catalog = TemplateCatalog::new(config.clone(), Arc::new(InMemoryActivation::new()));
        let locales = catalog.available_locales(&TemplateSpec::new("page.html"), None);
        assert_eq!(&locales, config.prod_languages());
    }

    #[test]
    fn test_activation_files_intersect() {
        let activation = InMemoryActivation::new()
            .with_file("dude", set(&["fr", "de", "en-GB"]))
            .with_file("donny", set(&["fr", "en-GB"]));
        let catalog = TemplateCatalog::new(config(), Arc::new(activation));
        let spec = TemplateSpec::new("dude.html")
            .active_locales(["en-US", "en-GB", "fr", "de", "it"])
            .activation_files(["dude", "donny", "untracked"]);

        assert_eq!(
            catalog.available_locales(&spec, None).to_vec(),
            vec!["en-US", "en-GB", "fr"]
        );
    }

    #[test]
    fn test_add_active_locales() {
        let catalog = TemplateCatalog::new(config(), Arc::new(InMemoryActivation::new()));
        let spec = TemplateSpec::new("page.html").active_locales(["en-US"]);
        let extra = set(&["en-GB", "fr", "es-ES", "en-us"]);

        assert_eq!(
            catalog.available_locales(&spec, Some(&extra)).to_vec(),
            vec!["en-US", "en-GB", "fr", "es-ES"]
        );
    }

    #[test]
    fn test_describe_path() {
        let catalog = TemplateCatalog::new(config(), Arc::new(InMemoryActivation::new()))
            .route("/download/", TemplateSpec::new("download.html").active_locales(["en-US", "fr"]))
            .route_with_locales("/new/", TemplateSpec::new("new.html").active_locales(["en-US"]), set(&["de"]));

        let page = catalog.describe_path("/download/").unwrap();
        assert_eq!(page.canonical_path_without_locale, "/download/");
        assert_eq!(page.available_locales.to_vec(), vec!["en-US", "fr"]);

        assert_eq!(catalog.describe_path("/new/").unwrap().available_locales.to_vec(), vec!["en-US", "de"]);
        assert!(catalog.describe_path("/missing/").is_none());
    }
}

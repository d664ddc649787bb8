//! Locales of CMS pages
//!
//! The page tree lives in an external store. A page's available locales are
//! its own locale plus those of every published, non-alias page sharing its
//! translation key.

use super::store::{ActiveLocaleResolver, LocaleStore};
use crate::{
    L10nError, LanguageTag, LocaleSet, PageDescriptor, Result, SiteLocaleConfig, normalize, split_path,
};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

pub type PageId = u64;

/// One page in one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub id: PageId,
    /// Locale as stored, possibly lowercase
    pub locale: String,
    /// Path without locale, e.g. `/test-page/child-page/`
    pub url_path: String,
    pub live: bool,
    /// Set when this page is an untranslated mirror of another
    pub alias_of: Option<PageId>,
    pub translation_key: String,
}

impl PageRecord {
    /// Live and not an alias
    pub fn is_publishable(&self) -> bool {
        self.live && self.alias_of.is_none()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Page store unavailable: {0}")]
    Unavailable(String),

    #[error("Page store query failed: {0}")]
    Query(String),
}

impl From<CatalogError> for L10nError {
    fn from(err: CatalogError) -> Self {
        L10nError::CatalogUnavailable(err.to_string())
    }
}

/// Read-only access to the CMS page tree
pub trait PageStore: Send + Sync {
    fn page(&self, id: PageId) -> std::result::Result<Option<PageRecord>, CatalogError>;

    /// Every other page sharing `id`'s translation key, in store order
    fn translations(&self, id: PageId) -> std::result::Result<Vec<PageRecord>, CatalogError>;

    /// Page at `path` in `locale` (any locale when `None`). Locale matching
    /// ignores case.
    fn find_for_path(
        &self,
        locale: Option<&str>,
        path: &str,
    ) -> std::result::Result<Option<PageRecord>, CatalogError>;
}

/// CMS translation discovery
pub struct CmsCatalog {
    config: Arc<SiteLocaleConfig>,
    store: Arc<dyn PageStore>,
    resolver: ActiveLocaleResolver,
}

impl CmsCatalog {
    /// Catalog whose locale store is the set of prod languages
    pub fn new(config: Arc<SiteLocaleConfig>, store: Arc<dyn PageStore>) -> Self {
        let locales: Arc<dyn LocaleStore> = Arc::new(config.prod_languages().clone());
        Self::with_locale_store(config, store, locales)
    }

    pub fn with_locale_store(
        config: Arc<SiteLocaleConfig>,
        store: Arc<dyn PageStore>,
        locales: Arc<dyn LocaleStore>,
    ) -> Self {
        let resolver = ActiveLocaleResolver::new(config.clone(), locales);
        Self {
            config,
            store,
            resolver,
        }
    }

    /// Available locales of a page; errors are logged and read as "none"
    pub fn locales_for_page(&self, id: PageId) -> LocaleSet {
        match self.try_locales_for_page(id) {
            Ok(locales) => locales,
            Err(L10nError::AliasOrDraftOnly) => {
                tracing::debug!(page = id, "page has only alias or draft translations");
                LocaleSet::new()
            }
            Err(e) => {
                tracing::warn!(page = id, error = %e, "could not list page translations");
                LocaleSet::new()
            }
        }
    }

    /// Available locales of a page.
    ///
    /// A page that cannot be found yields an empty set. A page with nothing
    /// publishable is [`L10nError::AliasOrDraftOnly`].
    pub fn try_locales_for_page(&self, id: PageId) -> Result<LocaleSet> {
        let Some(original) = self.store.page(id)? else {
            return Ok(LocaleSet::new());
        };

        let translations = self.store.translations(id)?;
        let locales: LocaleSet = std::iter::once(&original)
            .chain(translations.iter())
            .filter(|page| page.is_publishable())
            .map(|page| self.stored_locale(&page.locale))
            .collect();

        if locales.is_empty() {
            return Err(L10nError::AliasOrDraftOnly);
        }
        Ok(locales)
    }

    /// The page a request path resolves to; errors are logged and read as "no page"
    pub fn page_for_request(&self, raw_path: &str) -> Option<PageRecord> {
        match self.try_page_for_request(raw_path) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(path = raw_path, error = %e, "page lookup failed");
                None
            }
        }
    }

    /// The page a request path resolves to.
    ///
    /// The path locale is resolved against the locale store first (falling
    /// back to the default language). When no live page exists there, the
    /// default language and then any locale are tried. A page is reachable
    /// when its own translation is live; its parents need not be.
    pub fn try_page_for_request(&self, raw_path: &str) -> Result<Option<PageRecord>> {
        let split = split_path(&self.config, raw_path);
        let default = self.config.default_language();

        let mut attempts: Vec<Option<LanguageTag>> = Vec::with_capacity(3);
        if let Some(locale) = &split.locale {
            attempts.push(Some(self.resolver.resolve(locale.as_str())));
        }
        attempts.push(Some(default.clone()));
        attempts.push(None);

        for locale in attempts {
            let found = self
                .store
                .find_for_path(locale.as_ref().map(LanguageTag::as_str), &split.remainder)?;
            if let Some(page) = found.filter(|page| page.live) {
                return Ok(Some(page));
            }
        }
        Ok(None)
    }

    /// Available locales for whatever page `raw_path` resolves to
    pub fn locales_for_path(&self, raw_path: &str) -> LocaleSet {
        self.page_for_request(raw_path)
            .map(|page| self.locales_for_page(page.id))
            .unwrap_or_default()
    }

    /// Descriptor for `raw_path`, if it resolves to a CMS page
    pub fn describe_path(&self, raw_path: &str) -> Option<PageDescriptor> {
        let page = self.page_for_request(raw_path)?;
        let locales = self.locales_for_page(page.id);
        Some(PageDescriptor::cms_page(locales, page.url_path))
    }

    /// Stored tags go through [`normalize`]; tags the site does not serve stay as stored
    fn stored_locale(&self, raw: &str) -> LanguageTag {
        normalize(&self.config, raw).unwrap_or_else(|| LanguageTag::new(raw))
    }
}

/// Vec-backed [`PageStore`] for fixtures and tests
#[derive(Debug, Default)]
pub struct InMemoryPageStore {
    pages: RwLock<Vec<PageRecord>>,
    unavailable: RwLock<Option<String>>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, page: PageRecord) {
        let mut pages = self.pages.write();
        pages.retain(|p| p.id != page.id);
        pages.push(page);
    }

    /// Publish a new page and return its id
    pub fn add(&self, locale: &str, url_path: &str, translation_key: &str) -> PageId {
        let id = self.next_id();
        self.insert(PageRecord {
            id,
            locale: locale.to_string(),
            url_path: url_path.to_string(),
            live: true,
            alias_of: None,
            translation_key: translation_key.to_string(),
        });
        id
    }

    /// Copy `source` into `locale`, published
    pub fn translate(&self, source: PageId, locale: &str) -> Option<PageId> {
        self.copy(source, locale, false)
    }

    /// Mirror `source` into `locale` as an alias
    pub fn alias(&self, source: PageId, locale: &str) -> Option<PageId> {
        self.copy(source, locale, true)
    }

    pub fn unpublish(&self, id: PageId) {
        if let Some(page) = self.pages.write().iter_mut().find(|p| p.id == id) {
            page.live = false;
        }
    }

    /// Make every query fail with `reason` (`None` restores service)
    pub fn set_unavailable(&self, reason: Option<&str>) {
        *self.unavailable.write() = reason.map(str::to_string);
    }

    fn copy(&self, source: PageId, locale: &str, alias: bool) -> Option<PageId> {
        let original = self.pages.read().iter().find(|p| p.id == source).cloned()?;
        let id = self.next_id();
        self.insert(PageRecord {
            id,
            locale: locale.to_string(),
            alias_of: alias.then_some(source),
            ..original
        });
        Some(id)
    }

    fn next_id(&self) -> PageId {
        self.pages.read().iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn check(&self) -> std::result::Result<(), CatalogError> {
        match self.unavailable.read().as_ref() {
            Some(reason) => Err(CatalogError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl PageStore for InMemoryPageStore {
    fn page(&self, id: PageId) -> std::result::Result<Option<PageRecord>, CatalogError> {
        self.check()?;
        Ok(self.pages.read().iter().find(|p| p.id == id).cloned())
    }

    fn translations(&self, id: PageId) -> std::result::Result<Vec<PageRecord>, CatalogError> {
        self.check()?;
        let pages = self.pages.read();
        let Some(key) = pages.iter().find(|p| p.id == id).map(|p| p.translation_key.clone()) else {
            return Ok(Vec::new());
        };
        Ok(pages
            .iter()
            .filter(|p| p.id != id && p.translation_key == key)
            .cloned()
            .collect())
    }

    fn find_for_path(
        &self,
        locale: Option<&str>,
        path: &str,
    ) -> std::result::Result<Option<PageRecord>, CatalogError> {
        self.check()?;
        Ok(self
            .pages
            .read()
            .iter()
            .filter(|p| p.url_path == path)
            .filter(|p| locale.is_none_or(|l| p.locale.eq_ignore_ascii_case(l)))
            .find(|p| p.live || locale.is_some())
            .cloned())
    }
}

impl LocaleStore for InMemoryPageStore {
    fn contains(&self, code: &str) -> bool {
        self.pages.read().iter().any(|p| p.locale == code)
    }
}

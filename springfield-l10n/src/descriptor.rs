//! Requested page and the locales it exists in

use crate::{LocaleSet, RequestFingerprint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// Statically declared page, locales from its declaration
    Template,
    /// CMS page, locales from its published translations
    CmsPage,
    /// Reserved path that never carries a locale
    Nonlocale,
    /// Path served the same with or without a locale
    LocaleIgnored,
}

/// What the catalog knows about the requested resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub kind: PageKind,
    pub available_locales: LocaleSet,
    /// Path used when rewriting to another locale, e.g. `/download/`
    pub canonical_path_without_locale: String,
}

impl PageDescriptor {
    pub fn template(available_locales: LocaleSet, path: impl Into<String>) -> Self {
        Self {
            kind: PageKind::Template,
            available_locales,
            canonical_path_without_locale: path.into(),
        }
    }

    pub fn cms_page(available_locales: LocaleSet, path: impl Into<String>) -> Self {
        Self {
            kind: PageKind::CmsPage,
            available_locales,
            canonical_path_without_locale: path.into(),
        }
    }

    pub fn nonlocale(path: impl Into<String>) -> Self {
        Self {
            kind: PageKind::Nonlocale,
            available_locales: LocaleSet::new(),
            canonical_path_without_locale: path.into(),
        }
    }

    pub fn locale_ignored(path: impl Into<String>) -> Self {
        Self {
            kind: PageKind::LocaleIgnored,
            available_locales: LocaleSet::new(),
            canonical_path_without_locale: path.into(),
        }
    }

    /// Unknown resource: a template available nowhere, which decides to 404
    pub fn missing(path: impl Into<String>) -> Self {
        Self::template(LocaleSet::new(), path)
    }

    /// One URL per available locale, as listed in sitemaps
    ///
    /// ```
    /// use springfield_l10n::{LocaleSet, PageDescriptor};
    ///
    /// let page = PageDescriptor::template(["en-US", "fr"].into_iter().collect(), "/download/");
    /// assert_eq!(page.localized_paths(), vec!["/en-US/download/", "/fr/download/"]);
    /// ```
    pub fn localized_paths(&self) -> Vec<String> {
        self.available_locales
            .iter()
            .map(|locale| format!("/{}{}", locale, self.canonical_path_without_locale))
            .collect()
    }
}

/// Produces the [`PageDescriptor`] for a request.
///
/// Implementations recover their own failures: an unreachable store yields
/// an empty locale set, never an error.
pub trait PageDescriptorProvider: Send + Sync {
    fn describe(&self, request: &RequestFingerprint) -> PageDescriptor;
}

impl<F> PageDescriptorProvider for F
where
    F: Fn(&RequestFingerprint) -> PageDescriptor + Send + Sync,
{
    fn describe(&self, request: &RequestFingerprint) -> PageDescriptor {
        self(request)
    }
}

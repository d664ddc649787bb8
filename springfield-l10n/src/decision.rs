//! Serve, redirect or 404
//!
//! [`decide`] is a pure function of the request, the page descriptor and the
//! site config. Side effects (metrics, response headers) belong to the caller;
//! see [`LocalePipeline::dispatch`](crate::LocalePipeline::dispatch).

use crate::{
    LanguageTag, PageDescriptor, PageKind, RequestFingerprint, SiteLocaleConfig,
    accept_language_candidates, best_translation_or_default, split_path,
};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    ServeAsIs {
        locale: LanguageTag,
        vary_on_accept_language: bool,
    },
    Redirect {
        /// Target path, never including a query string
        to_path: String,
        from_locale: Option<LanguageTag>,
        to_locale: LanguageTag,
    },
    NotFound,
}

impl LocaleDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }

    fn serve(locale: &LanguageTag, vary_on_accept_language: bool) -> Self {
        Self::ServeAsIs {
            locale: locale.clone(),
            vary_on_accept_language,
        }
    }

    fn redirect(to_locale: LanguageTag, remainder: &str, from_locale: Option<LanguageTag>) -> Self {
        Self::Redirect {
            to_path: format!("/{}{}", to_locale, remainder),
            from_locale,
            to_locale,
        }
    }
}

impl fmt::Display for LocaleDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServeAsIs {
                locale,
                vary_on_accept_language,
            } => write!(f, "serve {} (vary: {})", locale, vary_on_accept_language),
            Self::Redirect { to_path, .. } => write!(f, "redirect to {}", to_path),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

/// Decide how to answer a request for `page`.
///
/// ```
/// use springfield_config::L10nSettings;
/// use springfield_l10n::*;
///
/// let config = SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap();
/// let page = PageDescriptor::template(["en-US", "fr"].into_iter().collect(), "/download/");
///
/// let request = RequestFingerprint::get("/download/").with_accept_language("fr-FR");
/// assert_eq!(
///     decide(&config, &request, &page),
///     LocaleDecision::Redirect {
///         to_path: "/fr/download/".to_string(),
///         from_locale: None,
///         to_locale: "fr".into(),
///     }
/// );
/// ```
pub fn decide(
    config: &SiteLocaleConfig,
    request: &RequestFingerprint,
    page: &PageDescriptor,
) -> LocaleDecision {
    let split = split_path(config, &request.raw_path);
    let default = config.default_language();

    if split.was_rewritten
        && let Some(locale) = split.locale.clone()
    {
        return LocaleDecision::redirect(locale, &split.remainder, None);
    }

    if page.kind == PageKind::Nonlocale || split.nonlocale {
        return LocaleDecision::serve(default, false);
    }

    if page.kind == PageKind::LocaleIgnored || split.locale_ignored {
        return LocaleDecision::serve(split.locale.as_ref().unwrap_or(default), false);
    }

    let available = &page.available_locales;
    let is_cms = page.kind == PageKind::CmsPage;

    match split.locale {
        Some(locale) if available.contains(locale.as_str()) => {
            let vary = split.remainder == "/";
            LocaleDecision::serve(&locale, vary)
        }
        Some(locale) => {
            let candidates = accept_language_candidates(request.accept_language());
            match best_translation_or_default(config, available, &candidates) {
                Some(best) => LocaleDecision::redirect(best, &split.remainder, Some(locale)),
                None if is_cms => LocaleDecision::serve(default, false),
                None => LocaleDecision::NotFound,
            }
        }
        None => {
            let candidates = accept_language_candidates(request.accept_language());
            // Root stays unprefixed only when the client sent no preference at all
            let header_sent = !request.accept_language().trim().is_empty();
            if split.remainder == "/" && !header_sent && candidates.is_empty() {
                return LocaleDecision::serve(default, true);
            }
            match best_translation_or_default(config, available, &candidates) {
                Some(best) => LocaleDecision::redirect(best, &split.remainder, None),
                None if is_cms => LocaleDecision::redirect(default.clone(), &split.remainder, None),
                None => LocaleDecision::NotFound,
            }
        }
    }
}

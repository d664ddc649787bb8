//! Best-translation selection
//!
//! Candidates come from the Accept-Language header, already ordered by
//! quality. Available locales are never used to re-rank them.

use crate::tag::primary_subtag;
use crate::{LanguageTag, LocaleSet, SiteLocaleConfig};

/// Best available locale for the candidates, falling back to the site default.
///
/// When the default language is not available either, the first available
/// locale that is a site language is returned. `None` only when the page has
/// no locale the site can serve.
///
/// # Example
///
/// ```
/// use springfield_config::L10nSettings;
/// use springfield_l10n::{best_translation_or_default, LocaleSet, SiteLocaleConfig};
///
/// let config = SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap();
/// let available: LocaleSet = ["en-US", "fr", "es-ES"].into_iter().collect();
///
/// let candidates = vec!["es-cl".to_string(), "en".to_string()];
/// assert_eq!(best_translation_or_default(&config, &available, &candidates).unwrap(), "es-ES");
///
/// let candidates = vec!["zu".to_string()];
/// assert_eq!(best_translation_or_default(&config, &available, &candidates).unwrap(), "en-US");
/// ```
pub fn best_translation_or_default(
    config: &SiteLocaleConfig,
    available: &LocaleSet,
    candidates: &[String],
) -> Option<LanguageTag> {
    if let Some(best) = best_translation_or_none(config, available, candidates) {
        return Some(best);
    }

    let default = config.default_language();
    if available.contains(default.as_str()) {
        return Some(default.clone());
    }

    available
        .iter()
        .find(|tag| config.is_site_language(tag.as_str()))
        .cloned()
}

/// Best available locale for the candidates, without any default.
///
/// Used where serving a locale the visitor did not ask for would be wrong,
/// such as listing localized home pages.
pub fn best_translation_or_none(
    config: &SiteLocaleConfig,
    available: &LocaleSet,
    candidates: &[String],
) -> Option<LanguageTag> {
    let fallbacks = config.language_url_map_with_fallbacks();
    let servable = |key: &str| {
        fallbacks
            .get(key)
            .filter(|tag| available.contains(tag.as_str()))
            .cloned()
    };

    candidates.iter().find_map(|candidate| {
        let lowered = candidate.to_ascii_lowercase();
        servable(&lowered).or_else(|| servable(&primary_subtag(&lowered)))
    })
}

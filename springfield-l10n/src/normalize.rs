//! Language tag normalization
//!
//! The one place where request-supplied case (`en-gb`) is reconciled with the
//! site's stored case (`en-GB`).

use crate::tag::primary_subtag;
use crate::{L10nError, LanguageTag, Result, SiteLocaleConfig};
use std::collections::HashMap;

/// Canonicalize a raw tag against the site's `language_url_map`.
///
/// Returns `None` for malformed or unmapped input.
///
/// # Example
///
/// ```
/// use springfield_config::L10nSettings;
/// use springfield_l10n::{normalize, SiteLocaleConfig};
///
/// let config = SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap();
/// assert_eq!(normalize(&config, "en-gb").unwrap(), "en-GB");
/// assert_eq!(normalize(&config, "fr-FR").unwrap(), "fr");
/// assert!(normalize(&config, "xx").is_none());
/// ```
pub fn normalize(config: &SiteLocaleConfig, raw: &str) -> Option<LanguageTag> {
    lookup(config.language_url_map(), raw)
}

/// Like [`normalize`], reporting a miss as [`L10nError::UnknownLocaleTag`]
pub fn try_normalize(config: &SiteLocaleConfig, raw: &str) -> Result<LanguageTag> {
    normalize(config, raw).ok_or_else(|| L10nError::UnknownLocaleTag(raw.to_string()))
}

/// Full-tag lookup, then primary-subtag lookup, in a lowercase-keyed map
pub(crate) fn lookup(map: &HashMap<String, LanguageTag>, raw: &str) -> Option<LanguageTag> {
    if !LanguageTag::is_well_formed(raw) {
        return None;
    }

    let lowered = raw.to_ascii_lowercase();
    map.get(&lowered)
        .or_else(|| map.get(&primary_subtag(&lowered)))
        .cloned()
}

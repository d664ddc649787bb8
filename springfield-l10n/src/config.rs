//! Site locale configuration, derived once at startup

use crate::{L10nError, LanguageTag, LocaleSet, Result};
use springfield_config::{ConfigError, L10nSettings};
use std::collections::HashMap;

/// Read-only snapshot of the site's locale settings and lookup maps.
///
/// Built with [`SiteLocaleConfig::from_settings`] and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SiteLocaleConfig {
    prod_languages: LocaleSet,
    default_language: LanguageTag,
    language_url_map: HashMap<String, LanguageTag>,
    language_url_map_with_fallbacks: HashMap<String, LanguageTag>,
    supported_nonlocales: Vec<String>,
    supported_locale_ignore: Vec<String>,
}

impl SiteLocaleConfig {
    /// Derive the lookup maps.
    ///
    /// Malformed `prod_languages` entries are skipped with a warning. The
    /// default language must be one of the remaining ones, and every
    /// canonical-locale target must be served.
    pub fn from_settings(settings: &L10nSettings) -> Result<Self> {
        let mut prod_languages = LocaleSet::new();
        for tag in &settings.prod_languages {
            if !LanguageTag::is_well_formed(tag) {
                tracing::warn!(tag = %tag, "skipping malformed prod language");
                continue;
            }
            prod_languages.insert(tag.as_str());
        }

        let default_language = LanguageTag::new(settings.default_language.clone());
        if !prod_languages.contains(default_language.as_str()) {
            return Err(L10nError::Config(ConfigError::Validation(format!(
                "default_language {:?} is not a prod language",
                settings.default_language
            ))));
        }

        let mut language_url_map: HashMap<String, LanguageTag> = prod_languages
            .iter()
            .map(|tag| (tag.as_str().to_ascii_lowercase(), tag.clone()))
            .collect();

        for (generic, canonical) in &settings.canonical_locales {
            if !prod_languages.contains(canonical) {
                return Err(L10nError::Config(ConfigError::Validation(format!(
                    "canonical locale {:?} maps to {:?}, which is not a prod language",
                    generic, canonical
                ))));
            }
            language_url_map.insert(generic.to_ascii_lowercase(), LanguageTag::new(canonical.clone()));
        }

        let mut language_url_map_with_fallbacks = language_url_map.clone();
        for tag in &prod_languages {
            language_url_map_with_fallbacks
                .entry(tag.primary())
                .or_insert_with(|| tag.clone());
        }

        tracing::debug!(
            prod_languages = prod_languages.len(),
            default = %default_language,
            "site locale config built"
        );

        Ok(Self {
            prod_languages,
            default_language,
            language_url_map,
            language_url_map_with_fallbacks,
            supported_nonlocales: settings
                .supported_nonlocales
                .iter()
                .map(|s| s.trim_matches('/').to_string())
                .collect(),
            supported_locale_ignore: settings
                .supported_locale_ignore
                .iter()
                .map(|s| format!("/{}", s.trim_start_matches('/')))
                .collect(),
        })
    }

    pub fn prod_languages(&self) -> &LocaleSet {
        &self.prod_languages
    }

    pub fn default_language(&self) -> &LanguageTag {
        &self.default_language
    }

    /// Lowercased tag to canonical tag
    pub fn language_url_map(&self) -> &HashMap<String, LanguageTag> {
        &self.language_url_map
    }

    /// [`language_url_map`](Self::language_url_map) plus primary-subtag fallbacks
    pub fn language_url_map_with_fallbacks(&self) -> &HashMap<String, LanguageTag> {
        &self.language_url_map_with_fallbacks
    }

    /// Whether `tag` is a canonical site language (a fallback map target)
    pub fn is_site_language(&self, tag: &str) -> bool {
        self.language_url_map_with_fallbacks.values().any(|t| t == tag)
    }

    /// First path segment is reserved for a non-localized resource
    pub fn is_nonlocale_segment(&self, segment: &str) -> bool {
        self.supported_nonlocales.iter().any(|s| s == segment)
    }

    /// Path (without locale) resolves with or without a locale prefix
    pub fn is_locale_ignored(&self, remainder: &str) -> bool {
        self.supported_locale_ignore
            .iter()
            .any(|prefix| remainder.starts_with(prefix.as_str()))
    }
}

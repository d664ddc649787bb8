//! Site locale settings as they appear in configuration sources.
//!
//! These are raw values. The l10n crate derives its lookup maps from them
//! once at startup.

use crate::{ConfigValidator, Result, Validate};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Locale settings for the whole site.
///
/// Every field has a production default, so partial sources only override
/// what they name. List fields also accept a comma-separated string and
/// `canonical_locales` accepts `"en=en-US,es=es-ES"`, which is how they are
/// written in environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct L10nSettings {
    /// Canonical tag served when nothing better is known
    pub default_language: String,

    /// Languages the site may serve, in canonical (mixed) case
    #[serde(deserialize_with = "list_or_csv")]
    pub prod_languages: Vec<String>,

    /// Generic or legacy tags mapped onto a served language
    #[serde(deserialize_with = "map_or_pairs")]
    pub canonical_locales: BTreeMap<String, String>,

    /// First path segments that never carry a locale
    #[serde(deserialize_with = "list_or_csv")]
    pub supported_nonlocales: Vec<String>,

    /// Paths that resolve with or without a locale prefix
    #[serde(deserialize_with = "list_or_csv")]
    pub supported_locale_ignore: Vec<String>,
}

impl Default for L10nSettings {
    fn default() -> Self {
        let prod_languages = [
            "de", "el", "en-CA", "en-GB", "en-US", "es-AR", "es-CL", "es-ES", "es-MX", "fr",
            "fy-NL", "hu", "id", "it", "ja", "nb-NO", "nl", "pl", "pt-BR", "pt-PT", "ru", "sq",
            "sv-SE", "tr", "uk", "zh-CN", "zh-TW",
        ];
        let canonical_locales = [
            ("en", "en-US"),
            ("es", "es-ES"),
            ("ja-jp-mac", "ja"),
            ("no", "nb-NO"),
            ("pt", "pt-BR"),
            ("sv", "sv-SE"),
            ("zh-hant", "zh-TW"),
            ("zh-hant-tw", "zh-TW"),
            ("zh-hk", "zh-TW"),
            ("zh-hant-hk", "zh-TW"),
        ];
        let nonlocales = [
            ".well-known",
            "_internal_draft_preview",
            "all-urls-global.xml",
            "cms-admin",
            "country-code.json",
            "csp-violation-capture",
            "healthz",
            "healthz-cron",
            "media",
            "readiness",
            "revision.txt",
            "robots.txt",
            "sitemap.xml",
            "static",
        ];

        Self {
            default_language: "en-US".to_string(),
            prod_languages: prod_languages.iter().map(|s| s.to_string()).collect(),
            canonical_locales: canonical_locales
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            supported_nonlocales: nonlocales.iter().map(|s| s.to_string()).collect(),
            supported_locale_ignore: vec!["/all-urls.xml".to_string(), "/sitemap_none.xml".to_string()],
        }
    }
}

impl Validate for L10nSettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::is_language_tag(&self.default_language, "default_language")?;

        for tag in &self.prod_languages {
            ConfigValidator::is_language_tag(tag, "prod_languages")?;
        }
        ConfigValidator::unique_ignoring_case(&self.prod_languages, "prod_languages")?;
        ConfigValidator::one_of(&self.default_language, &self.prod_languages, "default_language")?;

        for (generic, canonical) in &self.canonical_locales {
            ConfigValidator::is_language_tag(generic, "canonical_locales")?;
            ConfigValidator::one_of(canonical, &self.prod_languages, "canonical_locales target")?;
        }

        for prefix in self.supported_nonlocales.iter().chain(&self.supported_locale_ignore) {
            ConfigValidator::not_empty(prefix.trim_matches('/'), "supported path prefix")?;
        }

        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

fn list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(items) => items,
        ListOrCsv::Csv(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MapOrPairs {
    Map(BTreeMap<String, String>),
    Pairs(String),
}

fn map_or_pairs<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    match MapOrPairs::deserialize(deserializer)? {
        MapOrPairs::Map(map) => Ok(map),
        MapOrPairs::Pairs(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|pair| {
                pair.split_once('=')
                    .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                    .ok_or_else(|| serde::de::Error::custom(format!("expected key=value, got {:?}", pair)))
            })
            .collect(),
    }
}

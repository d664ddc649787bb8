//! Request path classification

use crate::{LanguageTag, SiteLocaleConfig};

/// A request path split into its locale prefix and the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSplit {
    /// Canonical locale from the first segment, if it is one
    pub locale: Option<LanguageTag>,
    /// Path after the locale segment, always starting with `/`
    pub remainder: String,
    /// The locale segment was not in canonical form (`/en-gb/`, `/en-US`)
    pub was_rewritten: bool,
    /// First segment is a reserved non-localized prefix
    pub nonlocale: bool,
    /// Remainder is served with or without a locale prefix
    pub locale_ignored: bool,
}

impl PathSplit {
    /// `"/" + locale + remainder`, or the remainder when there is no locale
    pub fn canonical_path(&self) -> String {
        match &self.locale {
            Some(locale) => format!("/{}{}", locale, self.remainder),
            None => self.remainder.clone(),
        }
    }

    fn unlocalized(path: &str, nonlocale: bool, locale_ignored: bool) -> Self {
        Self {
            locale: None,
            remainder: path.to_string(),
            was_rewritten: false,
            nonlocale,
            locale_ignored,
        }
    }
}

/// Split `path` into `(locale, remainder, was_rewritten)` plus classification.
///
/// ```
/// use springfield_config::L10nSettings;
/// use springfield_l10n::{split_path, SiteLocaleConfig};
///
/// let config = SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap();
///
/// let split = split_path(&config, "/en-gb/download/");
/// assert_eq!(split.locale.unwrap(), "en-GB");
/// assert_eq!(split.remainder, "/download/");
/// assert!(split.was_rewritten);
///
/// let split = split_path(&config, "/robots.txt");
/// assert!(split.locale.is_none() && split.nonlocale);
/// ```
pub fn split_path(config: &SiteLocaleConfig, path: &str) -> PathSplit {
    let Some(rest) = path.strip_prefix('/') else {
        return PathSplit::unlocalized(path, false, false);
    };
    if rest.is_empty() {
        return PathSplit::unlocalized(path, false, false);
    }

    let (segment, after) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    if config.is_nonlocale_segment(segment) {
        return PathSplit::unlocalized(path, true, false);
    }

    let Some(canonical) = config.language_url_map().get(&segment.to_ascii_lowercase()) else {
        return PathSplit::unlocalized(path, false, config.is_locale_ignored(path));
    };

    let remainder = if after.is_empty() { "/" } else { after };
    PathSplit {
        locale: Some(canonical.clone()),
        remainder: remainder.to_string(),
        was_rewritten: canonical.as_str() != segment || after.is_empty(),
        nonlocale: false,
        locale_ignored: config.is_locale_ignored(remainder),
    }
}

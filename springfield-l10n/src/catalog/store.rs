//! Reconciling runtime language tags with stored locales

use crate::{L10nError, LanguageTag, LocaleSet, Result, SiteLocaleConfig, normalize};
use std::collections::HashSet;
use std::sync::Arc;

/// Set of locale codes known to a store, in stored (mixed) case
pub trait LocaleStore: Send + Sync {
    fn contains(&self, code: &str) -> bool;
}

impl LocaleStore for LocaleSet {
    fn contains(&self, code: &str) -> bool {
        LocaleSet::contains(self, code)
    }
}

impl LocaleStore for HashSet<String> {
    fn contains(&self, code: &str) -> bool {
        HashSet::contains(self, code)
    }
}

/// Maps the runtime's language tag (often lowercase, `en-gb`) onto a locale
/// the store actually holds (`en-GB`).
///
/// ```
/// use springfield_config::L10nSettings;
/// use springfield_l10n::{ActiveLocaleResolver, LocaleSet, SiteLocaleConfig};
/// use std::sync::Arc;
///
/// let config = Arc::new(SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap());
/// let store: LocaleSet = ["en-US", "en-GB"].into_iter().collect();
/// let resolver = ActiveLocaleResolver::new(config, Arc::new(store));
///
/// assert_eq!(resolver.resolve("en-gb"), "en-GB");
/// assert_eq!(resolver.resolve("fr"), "en-US");
/// ```
pub struct ActiveLocaleResolver {
    config: Arc<SiteLocaleConfig>,
    store: Arc<dyn LocaleStore>,
}

impl ActiveLocaleResolver {
    pub fn new(config: Arc<SiteLocaleConfig>, store: Arc<dyn LocaleStore>) -> Self {
        Self { config, store }
    }

    /// Stored locale for `runtime_tag`, or the default language with a warning
    pub fn resolve(&self, runtime_tag: &str) -> LanguageTag {
        match self.try_resolve(runtime_tag) {
            Ok(tag) => tag,
            Err(_) => {
                let default = self.config.default_language();
                tracing::warn!(
                    requested = runtime_tag,
                    fallback = %default,
                    "locale not in store, using default language"
                );
                default.clone()
            }
        }
    }

    /// Stored locale for `runtime_tag`, if the store holds it after normalization
    pub fn try_resolve(&self, runtime_tag: &str) -> Result<LanguageTag> {
        let candidate = normalize(&self.config, runtime_tag).unwrap_or_else(|| LanguageTag::new(runtime_tag));
        if self.store.contains(candidate.as_str()) {
            Ok(candidate)
        } else {
            Err(L10nError::UnknownLocaleTag(runtime_tag.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use springfield_config::L10nSettings;

    fn resolver(codes: &[&str]) -> ActiveLocaleResolver {
        let config = Arc::new(SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap());
        let store: HashSet<String> = codes.iter().map(|s| s.to_string()).collect();
        ActiveLocaleResolver::new(config, Arc::new(store))
    }

    #[test]
    fn test_lowercase_runtime_tag() {
        let resolver = resolver(&["en-US", "en-GB", "pt-BR"]);
        assert_eq!(resolver.resolve("en-gb"), "en-GB");
        assert_eq!(resolver.resolve("pt-br"), "pt-BR");
        assert_eq!(resolver.resolve("en-US"), "en-US");
    }

    #[test]
    fn test_missing_from_store_falls_back() {
        let resolver = resolver(&["en-US"]);
        assert_eq!(resolver.resolve("de"), "en-US");
        assert!(matches!(resolver.try_resolve("de"), Err(L10nError::UnknownLocaleTag(_))));
    }

    #[test]
    fn test_unmapped_tag_checked_verbatim() {
        let resolver = resolver(&["en-US", "sco"]);
        assert_eq!(resolver.resolve("sco"), "sco");
        assert_eq!(resolver.resolve("xx-yy"), "en-US");
    }
}

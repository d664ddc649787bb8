//! Environment variable loading

use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::env;

/// Collects `PREFIX_KEY=value` variables as lowercase `key` entries.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load matching variables from the process environment.
    pub fn load(&self) -> HashMap<String, String> {
        self.load_from(env::vars())
    }

    /// Load matching variables from an explicit list of pairs.
    pub fn load_from<I, K, V>(&self, vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = HashMap::new();

        for (key, value) in vars {
            let key = key.as_ref();
            let trimmed = match &self.prefix {
                Some(prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(rest) => match rest.strip_prefix('_') {
                        Some(rest) if !rest.is_empty() => rest,
                        _ => continue,
                    },
                    None => continue,
                },
                None => key,
            };
            config.insert(trimmed.to_lowercase(), value.into());
        }

        config
    }

    /// Load a single variable, applying the prefix.
    pub fn load_var(&self, key: &str) -> Result<String> {
        env::var(self.full_key(key)).map_err(ConfigError::Env)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // std::env::set_var is unsafe in edition 2024, so these tests feed
    // variables through load_from instead of mutating the process environment.

    #[test]
    fn test_prefix_filtering() {
        let loader = EnvLoader::new(Some("SPRINGFIELD_L10N".to_string()));
        let vars = loader.load_from([
            ("SPRINGFIELD_L10N_DEFAULT_LANGUAGE", "fr"),
            ("SPRINGFIELD_L10N_PROD_LANGUAGES", "fr,de"),
            ("SPRINGFIELD_L10NX_OTHER", "ignored"),
            ("SPRINGFIELD_L10N_", "ignored"),
            ("PATH", "/usr/bin"),
        ]);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars["default_language"], "fr");
        assert_eq!(vars["prod_languages"], "fr,de");
    }

    #[test]
    fn test_no_prefix_keeps_everything() {
        let loader = EnvLoader::default();
        let vars = loader.load_from([("HOME", "/root"), ("LANG", "C")]);
        assert_eq!(vars["home"], "/root");
        assert_eq!(vars["lang"], "C");
    }

    #[test]
    fn test_load_var_or_default() {
        let loader = EnvLoader::new(Some("SPRINGFIELD_TEST".to_string()));
        assert_eq!(loader.load_var_or("NONEXISTENT_VAR_12345", "default"), "default");
        assert!(loader.load_var("MISSING_VAR_67890").is_err());
    }

    #[test]
    fn test_full_key() {
        let loader = EnvLoader::new(Some("SPRINGFIELD_L10N".to_string()));
        assert_eq!(loader.full_key("default_language"), "SPRINGFIELD_L10N_DEFAULT_LANGUAGE");
    }
}

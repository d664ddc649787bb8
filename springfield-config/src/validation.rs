//! Configuration validation

use crate::{ConfigError, Result};
use std::collections::HashSet;

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Reusable validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    /// `primary[-subtag...]`, ASCII letters and digits only.
    pub fn is_language_tag(value: &str, field: &'static str) -> Result<()> {
        let well_formed = !value.is_empty()
            && value
                .split('-')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));

        if !well_formed {
            return Err(ConfigError::InvalidLanguageTag {
                field,
                tag: value.to_string(),
            });
        }
        Ok(())
    }

    pub fn one_of<T: PartialEq + std::fmt::Debug>(value: &T, allowed: &[T], field: &str) -> Result<()> {
        if !allowed.contains(value) {
            return Err(ConfigError::Validation(format!(
                "{} must be one of {:?}, got {:?}",
                field, allowed, value
            )));
        }
        Ok(())
    }

    /// Entries must be unique once lowercased.
    pub fn unique_ignoring_case(values: &[String], field: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for value in values {
            if !seen.insert(value.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "{} contains {:?} more than once",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

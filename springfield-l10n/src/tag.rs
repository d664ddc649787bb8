//! Language tags and locale sets

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A language tag in whatever case it was given (`en`, `en-GB`, `ja-JP-mac`).
///
/// Tags held by the site config are in canonical (stored) case; tags parsed
/// from request input are lowercased. Comparison is case-sensitive; the
/// normalizer is the only place case is reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag, lowercased (`pt-BR` gives `pt`)
    pub fn primary(&self) -> String {
        primary_subtag(&self.0)
    }

    /// `primary(-ALPHA/DIGIT)*` with ASCII alphanumerics only
    pub fn is_well_formed(raw: &str) -> bool {
        !raw.is_empty()
            && raw
                .split('-')
                .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_alphanumeric()))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub(crate) fn primary_subtag(raw: &str) -> String {
    raw.split('-').next().unwrap_or_default().to_ascii_lowercase()
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl PartialEq<str> for LanguageTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Locales a page is available in.
///
/// Keeps insertion order (the CMS original locale comes first) and never
/// holds two tags that differ only in case; the first spelling wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleSet(Vec<LanguageTag>);

impl LocaleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag; returns `false` if a case-insensitive duplicate is present
    pub fn insert(&mut self, tag: impl Into<LanguageTag>) -> bool {
        let tag = tag.into();
        if self.0.iter().any(|t| t.0.eq_ignore_ascii_case(&tag.0)) {
            return false;
        }
        self.0.push(tag);
        true
    }

    /// Case-sensitive membership against the stored spelling
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.0 == tag)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LanguageTag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&LanguageTag> {
        self.0.first()
    }

    /// Keep only tags for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(&LanguageTag) -> bool) {
        self.0.retain(|t| keep(t));
    }

    pub fn extend<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<LanguageTag>,
    {
        for tag in tags {
            self.insert(tag);
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().map(|t| t.0.clone()).collect()
    }
}

impl<T: Into<LanguageTag>> FromIterator<T> for LocaleSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for LocaleSet {
    type Item = LanguageTag;
    type IntoIter = std::vec::IntoIter<LanguageTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LocaleSet {
    type Item = &'a LanguageTag;
    type IntoIter = std::slice::Iter<'a, LanguageTag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

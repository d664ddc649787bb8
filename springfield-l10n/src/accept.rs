//! Accept-Language header parsing

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap_or_else(|_| unreachable!("static pattern"))
});

/// One `tag;q=value` entry of an Accept-Language header
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptLanguage {
    /// Lowercased tag
    pub tag: String,
    pub quality: f32,
}

/// Parse an Accept-Language header, highest quality first.
///
/// Tokens that are not `ALPHA/DIGIT(-ALPHA/DIGIT)*` (including `*`) are
/// dropped. A missing `q` means 1.0 and an unparsable one means 0. Entries
/// with equal quality keep their header order.
///
/// # Example
///
/// ```
/// use springfield_l10n::parse_accept_language;
///
/// let entries = parse_accept_language("de;q=0.5,en-US");
/// assert_eq!(entries[0].tag, "en-us");
/// assert_eq!(entries[1].tag, "de");
/// ```
pub fn parse_accept_language(header: &str) -> Vec<AcceptLanguage> {
    let mut entries: Vec<AcceptLanguage> = header
        .split(',')
        .filter_map(|token| {
            let mut parts = token.split(';');
            let tag = parts.next()?.trim();
            if !TAG_PATTERN.is_match(tag) {
                return None;
            }

            let quality = parts
                .filter_map(|param| {
                    let (key, value) = param.split_once('=')?;
                    (key.trim() == "q").then(|| value.trim())
                })
                .next()
                .map(|q| q.parse::<f32>().ok().filter(|q| !q.is_nan()).unwrap_or(0.0))
                .unwrap_or(1.0);

            Some(AcceptLanguage {
                tag: tag.to_ascii_lowercase(),
                quality,
            })
        })
        .collect();

    // Vec::sort_by is stable, so equal qualities keep header order
    entries.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    entries
}

/// Candidate tags from an Accept-Language header, best first
///
/// ```
/// use springfield_l10n::accept_language_candidates;
///
/// assert_eq!(
///     accept_language_candidates("ja-JP-mac,ja-JP;q=0.7,ja;q=0.3"),
///     vec!["ja-jp-mac", "ja-jp", "ja"],
/// );
/// ```
pub fn accept_language_candidates(header: &str) -> Vec<String> {
    parse_accept_language(header).into_iter().map(|e| e.tag).collect()
}

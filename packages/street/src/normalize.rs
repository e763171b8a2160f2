//! Canonical street name extraction.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{StreetRules, StreetRulesError};

/// Normalizer built from the embedded rules.
static DEFAULT_NORMALIZER: LazyLock<StreetNormalizer> = LazyLock::new(|| {
    StreetNormalizer::new(&StreetRules::embedded()).expect("valid embedded street rules")
});

/// Result of extracting a street from a location string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtractedStreet {
    /// A numbered street such as `"22ND AV"`.
    Numbered(String),
    /// A named street such as `"PINE ST"`.
    Named(String),
    /// No street could be recognized.
    Unparsable,
}

impl ExtractedStreet {
    /// The canonical street name, if one was extracted.
    #[must_use]
    pub fn street(&self) -> Option<&str> {
        match self {
            Self::Numbered(s) | Self::Named(s) => Some(s),
            Self::Unparsable => None,
        }
    }

    /// Consumes `self`, returning the canonical street name if any.
    #[must_use]
    pub fn into_street(self) -> Option<String> {
        match self {
            Self::Numbered(s) | Self::Named(s) => Some(s),
            Self::Unparsable => None,
        }
    }

    /// Whether extraction failed.
    #[must_use]
    pub const fn is_unparsable(&self) -> bool {
        matches!(self, Self::Unparsable)
    }
}

/// Compiled [`StreetRules`].
#[derive(Debug, Clone)]
pub struct StreetNormalizer {
    numbered: Regex,
    named: Regex,
    /// Keys are uppercased at construction.
    synonyms: BTreeMap<String, String>,
    strip_leading_v: bool,
}

impl StreetNormalizer {
    /// Compiles `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`StreetRulesError`] if a pattern does not compile or lacks
    /// the `name` or `suffix` capture group.
    pub fn new(rules: &StreetRules) -> Result<Self, StreetRulesError> {
        let numbered = compile("numbered", &rules.numbered_pattern)?;
        let named = compile("named", &rules.named_pattern)?;

        let synonyms = rules
            .suffix_synonyms
            .iter()
            .map(|(from, to)| (from.to_uppercase(), to.to_uppercase()))
            .collect();

        Ok(Self {
            numbered,
            named,
            synonyms,
            strip_leading_v: rules.strip_leading_v,
        })
    }

    /// Extracts the canonical street from a raw location string.
    ///
    /// Never fails: input with no recognizable street (including empty
    /// input) yields [`ExtractedStreet::Unparsable`].
    #[must_use]
    pub fn normalize(&self, raw: &str) -> ExtractedStreet {
        let cleaned = collapse_whitespace(raw);
        if cleaned.is_empty() {
            return ExtractedStreet::Unparsable;
        }

        if let Some((number, suffix)) = name_and_suffix(&self.numbered, &cleaned) {
            let suffix = self.canonical_suffix(suffix);
            return ExtractedStreet::Numbered(format!("{} {suffix}", number.to_uppercase()));
        }

        if let Some((name, suffix)) = name_and_suffix(&self.named, &cleaned) {
            let name = collapse_whitespace(name);
            let name = if self.strip_leading_v {
                strip_v_artifact(&name)
            } else {
                &name
            };
            if name.is_empty() {
                return ExtractedStreet::Unparsable;
            }
            let suffix = self.canonical_suffix(suffix);
            return ExtractedStreet::Named(format!("{} {suffix}", name.to_uppercase()));
        }

        ExtractedStreet::Unparsable
    }

    /// Maps a suffix through the synonym table, uppercasing it.
    #[must_use]
    pub fn canonical_suffix(&self, suffix: &str) -> String {
        let upper = suffix.to_uppercase();
        self.synonyms.get(&upper).cloned().unwrap_or(upper)
    }
}

impl Default for StreetNormalizer {
    fn default() -> Self {
        DEFAULT_NORMALIZER.clone()
    }
}

/// Compiles a pattern and checks its capture groups.
fn compile(which: &'static str, pattern: &str) -> Result<Regex, StreetRulesError> {
    let regex = Regex::new(pattern).map_err(|source| StreetRulesError::Pattern { which, source })?;

    for group in ["name", "suffix"] {
        if !regex.capture_names().flatten().any(|n| n == group) {
            return Err(StreetRulesError::MissingGroup { which, group });
        }
    }

    Ok(regex)
}

/// Runs `regex` over `text`, returning the `name` and `suffix` groups.
fn name_and_suffix<'t>(regex: &Regex, text: &'t str) -> Option<(&'t str, &'t str)> {
    let caps = regex.captures(text)?;
    Some((caps.name("name")?.as_str(), caps.name("suffix")?.as_str()))
}

/// Collapses whitespace runs to single spaces and trims.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops a leading `V` when it is immediately followed by an uppercase
/// ASCII letter. `"V STREET"`, `"V1"` and `"vNESS"` are left alone.
fn strip_v_artifact(name: &str) -> &str {
    match name.as_bytes() {
        [b'V', next, ..] if next.is_ascii_uppercase() => &name[1..],
        _ => name,
    }
}

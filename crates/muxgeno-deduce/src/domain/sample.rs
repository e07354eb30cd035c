//! Sample identifiers
//!
//! Identifiers are opaque tokens compared by exact text. Reports list them in
//! numeric order, which is defined here as the `Ord` of [`SampleId`].

use std::cmp::Ordering;
use std::fmt;

/// Set of sample identifiers
#[cfg(feature = "fx-hash")]
pub type SampleSet = rustc_hash::FxHashSet<SampleId>;

/// Set of sample identifiers
#[cfg(not(feature = "fx-hash"))]
pub type SampleSet = std::collections::HashSet<SampleId>;

/// Opaque sample identifier
///
/// Ordering:
/// - decimal identifiers compare by numeric value (any length, leading zeros
///   ignored, ties broken by the raw text so `0` sorts before `00`)
/// - non-numeric identifiers sort after every numeric one, lexicographically
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SampleId(String);

impl SampleId {
    /// Create an identifier from its textual form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Textual form of the identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the identifier is a decimal integer
    pub fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// Significant digits of a numeric identifier
    fn significant_digits(&self) -> Option<&str> {
        self.is_numeric().then(|| self.0.trim_start_matches('0'))
    }
}

impl Ord for SampleId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.significant_digits(), other.significant_digits()) {
            (Some(a), Some(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for SampleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SampleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SampleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for SampleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors raised when a fingerprint is rebuilt from stored counts
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("keyword `{0}` has a zero count")]
    ZeroCount(String),
}

/// Keyword-frequency map used to compare blog content
///
/// Keys are lowercase keywords, values are occurrence counts. A keyword that
/// never occurs is absent, so every stored count is at least 1. Keys are kept
/// sorted, which makes iteration order independent of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, u32>",
    into = "BTreeMap<String, u32>"
)]
pub struct Fingerprint(BTreeMap<String, u32>);

impl Fingerprint {
    /// Creates an empty fingerprint
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Counts one more occurrence of `keyword`
    pub fn add(&mut self, keyword: impl Into<String>) {
        *self.0.entry(keyword.into()).or_insert(0) += 1;
    }

    /// Occurrence count for `keyword`, if present
    pub fn get(&self, keyword: &str) -> Option<u32> {
        self.0.get(keyword).copied()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains_key(keyword)
    }

    /// Number of distinct keywords
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates keywords and counts in ascending keyword order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl TryFrom<BTreeMap<String, u32>> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(counts: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        if let Some((keyword, _)) = counts.iter().find(|(_, count)| **count == 0) {
            return Err(FingerprintError::ZeroCount(keyword.clone()));
        }
        Ok(Self(counts))
    }
}

impl From<Fingerprint> for BTreeMap<String, u32> {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

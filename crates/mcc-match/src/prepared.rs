//! Dictionary entries with their comparison keys computed once.
//!
//! Screening compares every diagnosis against every entry, so the canonical
//! code, normalized name and parsed exclusion set of each entry are derived
//! when the dictionary is loaded rather than on every comparison.

use std::collections::BTreeSet;

use mcc_model::{DictionaryEntry, MccType};

use crate::exclusion::parse_exclusions;
use crate::normalize::{canonical_code, normalize_str};

/// A dictionary entry plus its precomputed comparison keys.
#[derive(Debug, Clone)]
pub struct PreparedEntry {
    entry: DictionaryEntry,
    canonical_code: Option<String>,
    normalized_name: Option<String>,
    exclusions: BTreeSet<String>,
}

impl PreparedEntry {
    pub fn new(entry: DictionaryEntry) -> Self {
        let canonical_code = canonical_code(entry.code());
        let normalized_name = entry
            .name()
            .map(normalize_str)
            .filter(|name| !name.is_empty());
        let exclusions = parse_exclusions(entry.exclusion_raw());
        Self {
            entry,
            canonical_code,
            normalized_name,
            exclusions,
        }
    }

    pub fn entry(&self) -> &DictionaryEntry {
        &self.entry
    }

    pub fn mcc_type(&self) -> MccType {
        self.entry.mcc_type
    }

    /// Trimmed, upper-cased code; `None` when the entry has no code.
    pub fn canonical_code(&self) -> Option<&str> {
        self.canonical_code.as_deref()
    }

    /// Normalized name; `None` when the entry has no usable name.
    pub fn normalized_name(&self) -> Option<&str> {
        self.normalized_name.as_deref()
    }

    pub fn exclusions(&self) -> &BTreeSet<String> {
        &self.exclusions
    }

    /// Membership test for an already-canonical diagnosis code.
    pub fn excludes(&self, canonical_icd_code: &str) -> bool {
        self.exclusions.contains(canonical_icd_code)
    }
}

/// An ordered, immutable set of prepared entries.
///
/// Iteration order is dictionary order, which is the final tie-break when
/// ranking candidates.
#[derive(Debug, Clone, Default)]
pub struct PreparedDictionary {
    entries: Vec<PreparedEntry>,
}

impl PreparedDictionary {
    /// Prepares `entries`, dropping those with neither code nor name.
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        let total = entries.len();
        let entries: Vec<PreparedEntry> = entries
            .into_iter()
            .filter(DictionaryEntry::is_usable)
            .map(PreparedEntry::new)
            .collect();
        if entries.len() < total {
            tracing::warn!(
                skipped = total - entries.len(),
                "dictionary entries without code or name were skipped"
            );
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[PreparedEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PreparedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries of the given type.
    pub fn count_of(&self, mcc_type: MccType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.mcc_type() == mcc_type)
            .count()
    }
}

impl FromIterator<DictionaryEntry> for PreparedDictionary {
    fn from_iter<I: IntoIterator<Item = DictionaryEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

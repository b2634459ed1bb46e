//! Immutable, versioned dictionary snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mcc_match::PreparedDictionary;
use mcc_model::{DictionaryEntry, MccType};

use crate::hash::fingerprint_entries;

/// One complete, consistent view of the dictionary.
///
/// A snapshot is built once per load and then only ever read. The cache
/// publishes it behind an `Arc`; replacing the dictionary means publishing a
/// new snapshot, never editing this one.
#[derive(Debug)]
pub struct DictionarySnapshot {
    version: u64,
    loaded_at: DateTime<Utc>,
    fingerprint: String,
    dictionary: PreparedDictionary,
}

/// Summary of a snapshot for health and diagnostics pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotInfo {
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub entry_count: usize,
    pub mcc_count: usize,
    pub cc_count: usize,
    pub fingerprint: String,
}

impl DictionarySnapshot {
    pub fn new(version: u64, entries: Vec<DictionaryEntry>) -> Self {
        Self::with_timestamp(version, entries, Utc::now())
    }

    pub fn with_timestamp(
        version: u64,
        entries: Vec<DictionaryEntry>,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        let fingerprint = fingerprint_entries(&entries);
        Self {
            version,
            loaded_at,
            fingerprint,
            dictionary: PreparedDictionary::new(entries),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// The prepared entries, in dictionary order.
    pub fn dictionary(&self) -> &PreparedDictionary {
        &self.dictionary
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            version: self.version,
            loaded_at: self.loaded_at,
            entry_count: self.dictionary.len(),
            mcc_count: self.dictionary.count_of(MccType::Mcc),
            cc_count: self.dictionary.count_of(MccType::Cc),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<DictionaryEntry> {
        vec![
            DictionaryEntry::new(1, "I50.000", "心力衰竭", Some("I48.000"), MccType::Mcc),
            DictionaryEntry::new(2, "J18.900", "肺炎", None, MccType::Cc),
        ]
    }

    #[test]
    fn info_counts_types() {
        let snapshot = DictionarySnapshot::new(3, entries());
        let info = snapshot.info();
        assert_eq!(info.version, 3);
        assert_eq!(info.entry_count, 2);
        assert_eq!(info.mcc_count, 1);
        assert_eq!(info.cc_count, 1);
        assert_eq!(info.fingerprint.len(), 64);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = DictionarySnapshot::new(1, entries());
        let b = DictionarySnapshot::new(2, entries());
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut changed = entries();
        changed[1].exclusion_raw = Some("J18.000".to_string());
        let c = DictionarySnapshot::new(3, changed);
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}

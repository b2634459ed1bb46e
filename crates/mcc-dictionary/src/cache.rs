//! Hot-reloadable dictionary cache.
//!
//! The cache owns a single shared pointer to the current
//! [`DictionarySnapshot`]. Readers clone the `Arc` and work against that
//! snapshot for the whole call; a reload builds a complete new snapshot
//! off to the side and then swaps the pointer. A reader therefore sees
//! either the old snapshot or the new one in full, never a mix.
//!
//! # Locking
//!
//! - The pointer lives in an [`ArcSwapOption`]. Readers load it without
//!   taking a lock; a reload publishes with a single atomic store.
//! - Reloads are serialized by a mutex so versions stay monotonic.
//!   Screening never takes that mutex.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use serde::Serialize;

use crate::error::DictionaryError;
use crate::snapshot::DictionarySnapshot;
use crate::source::DictionarySource;

/// Lifecycle of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheState {
    /// Nothing has been loaded yet.
    Empty,
    /// A snapshot is published.
    Loaded { version: u64 },
}

pub struct DictionaryCache<S> {
    source: S,
    current: ArcSwapOption<DictionarySnapshot>,
    reload_lock: Mutex<()>,
}

impl<S: DictionarySource> DictionaryCache<S> {
    /// Creates an empty cache; nothing is fetched until [`Self::load`].
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: ArcSwapOption::empty(),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads the first snapshot, or returns the published one if present.
    ///
    /// Calling `load` on a loaded cache never refetches.
    pub fn load(&self) -> Result<Arc<DictionarySnapshot>, DictionaryError> {
        if let Some(snapshot) = self.current_snapshot() {
            return Ok(snapshot);
        }
        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished the first load while we waited.
        if let Some(snapshot) = self.current_snapshot() {
            return Ok(snapshot);
        }
        self.fetch_and_publish()
    }

    /// The published snapshot, if any. Lock-free; never waits on a reload.
    pub fn current_snapshot(&self) -> Option<Arc<DictionarySnapshot>> {
        self.current.load_full()
    }

    /// Fetches the full dictionary and publishes it as a new version.
    ///
    /// On failure the previously published snapshot (if any) stays in
    /// effect and the error is returned to the caller. Screening calls in
    /// flight keep the snapshot they started with.
    pub fn reload(&self) -> Result<Arc<DictionarySnapshot>, DictionaryError> {
        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.fetch_and_publish()
    }

    pub fn state(&self) -> CacheState {
        match self.current_snapshot() {
            Some(snapshot) => CacheState::Loaded {
                version: snapshot.version(),
            },
            None => CacheState::Empty,
        }
    }

    /// Caller must hold `reload_lock`.
    fn fetch_and_publish(&self) -> Result<Arc<DictionarySnapshot>, DictionaryError> {
        let previous = self.current_snapshot();
        let entries = match self.source.fetch_all_dictionary_entries() {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    kept_version = previous.as_ref().map(|s| s.version()),
                    %error,
                    "dictionary fetch failed; keeping previous snapshot"
                );
                return Err(error);
            }
        };

        let version = previous.as_ref().map_or(1, |s| s.version() + 1);
        let snapshot = Arc::new(DictionarySnapshot::new(version, entries));

        if snapshot.is_empty() {
            tracing::warn!(
                source = %self.source.describe(),
                version,
                "dictionary source returned no usable entries"
            );
        }
        let changed = previous
            .as_ref()
            .is_none_or(|p| p.fingerprint() != snapshot.fingerprint());

        self.current.store(Some(Arc::clone(&snapshot)));

        tracing::info!(
            source = %self.source.describe(),
            version,
            entries = snapshot.len(),
            fingerprint = %snapshot.fingerprint(),
            changed,
            "published dictionary snapshot"
        );
        Ok(snapshot)
    }
}

impl<S> std::fmt::Debug for DictionaryCache<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let version = self.current.load_full().map(|s| s.version());
        f.debug_struct("DictionaryCache")
            .field("version", &version)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticDictionarySource;
    use mcc_model::{DictionaryEntry, MccType};

    fn entry(id: i64, code: &str) -> DictionaryEntry {
        DictionaryEntry::new(id, code, "心力衰竭", None, MccType::Mcc)
    }

    #[test]
    fn starts_empty_then_loads_version_one() {
        let cache = DictionaryCache::new(StaticDictionarySource::new(vec![entry(1, "I50.000")]));
        assert_eq!(cache.state(), CacheState::Empty);
        assert!(cache.current_snapshot().is_none());

        let snapshot = cache.load().unwrap();
        assert_eq!(snapshot.version(), 1);
        assert_eq!(cache.state(), CacheState::Loaded { version: 1 });
    }

    #[test]
    fn load_does_not_refetch() {
        let source = Arc::new(StaticDictionarySource::new(vec![entry(1, "I50.000")]));
        let cache = DictionaryCache::new(Arc::clone(&source));
        cache.load().unwrap();

        source.replace(vec![]).unwrap();
        let again = cache.load().unwrap();
        assert_eq!(again.version(), 1);
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn reload_bumps_version_and_swaps() {
        let source = Arc::new(StaticDictionarySource::new(vec![entry(1, "I50.000")]));
        let cache = DictionaryCache::new(Arc::clone(&source));
        let first = cache.load().unwrap();

        source
            .replace(vec![entry(1, "I50.000"), entry(2, "I50.100")])
            .unwrap();
        let second = cache.reload().unwrap();

        assert_eq!(second.version(), 2);
        assert_eq!(second.len(), 2);
        // The old snapshot is untouched for anyone still holding it.
        assert_eq!(first.len(), 1);
        assert_eq!(cache.current_snapshot().unwrap().version(), 2);
    }

    #[test]
    fn reload_before_load_publishes_first_version() {
        let cache = DictionaryCache::new(StaticDictionarySource::new(vec![]));
        let snapshot = cache.reload().unwrap();
        assert_eq!(snapshot.version(), 1);
        assert!(snapshot.is_empty());
    }
}

//! The inbound boundary: where dictionary rows come from.

use std::sync::{Arc, Mutex};

use mcc_model::DictionaryEntry;

use crate::error::DictionaryError;

/// Supplies the complete MCC/CC dictionary.
///
/// Implementations must return every current entry in a stable order;
/// partial or paginated results are not supported. The cache calls this
/// outside of any lock, so a slow source never blocks screening.
pub trait DictionarySource: Send + Sync {
    fn fetch_all_dictionary_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError>;

    /// Short label used in log output.
    fn describe(&self) -> String {
        "dictionary source".to_string()
    }
}

impl<S: DictionarySource + ?Sized> DictionarySource for Arc<S> {
    fn fetch_all_dictionary_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        (**self).fetch_all_dictionary_entries()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: DictionarySource + ?Sized> DictionarySource for Box<S> {
    fn fetch_all_dictionary_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        (**self).fetch_all_dictionary_entries()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// In-memory source whose contents can be replaced between fetches.
///
/// Useful for hosts that already hold the rows (for example after their own
/// database query) and for tests.
#[derive(Debug, Default)]
pub struct StaticDictionarySource {
    entries: Mutex<Vec<DictionaryEntry>>,
}

impl StaticDictionarySource {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Replaces the rows returned by subsequent fetches.
    pub fn replace(&self, entries: Vec<DictionaryEntry>) -> Result<(), DictionaryError> {
        let mut guard = self.entries.lock().map_err(|_| DictionaryError::Poisoned)?;
        *guard = entries;
        Ok(())
    }
}

impl DictionarySource for StaticDictionarySource {
    fn fetch_all_dictionary_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let guard = self.entries.lock().map_err(|_| DictionaryError::Poisoned)?;
        Ok(guard.clone())
    }

    fn describe(&self) -> String {
        "in-memory dictionary".to_string()
    }
}

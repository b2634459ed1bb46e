#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use mcc_model::DictionaryEntry;

use crate::error::DictionaryError;
use crate::source::DictionarySource;

/// Reads the dictionary from a JSON array of entries.
///
/// Each element uses the [`DictionaryEntry`] serde layout:
/// `{"id": 1, "code": "I50.000", "name": "心力衰竭", "exclusion": "I48.000", "type": "MCC"}`.
#[derive(Debug, Clone)]
pub struct JsonDictionarySource {
    path: PathBuf,
}

impl JsonDictionarySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionarySource for JsonDictionarySource {
    fn fetch_all_dictionary_entries(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|e| DictionaryError::io(&self.path, e))?;
        serde_json::from_str(&contents).map_err(|e| DictionaryError::Json {
            path: self.path.clone(),
            source: e,
        })
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}

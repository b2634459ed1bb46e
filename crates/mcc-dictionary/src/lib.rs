#![deny(unsafe_code)]

pub mod cache;
pub mod csv;
pub mod error;
pub mod hash;
pub mod json;
pub mod snapshot;
pub mod source;

pub use crate::cache::{CacheState, DictionaryCache};
pub use crate::csv::CsvDictionarySource;
pub use crate::error::DictionaryError;
pub use crate::json::JsonDictionarySource;
pub use crate::snapshot::{DictionarySnapshot, SnapshotInfo};
pub use crate::source::{DictionarySource, StaticDictionarySource};

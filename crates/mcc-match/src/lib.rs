#![deny(unsafe_code)]

//! MCC/CC matching engine.
//!
//! Given patient diagnoses and a prepared dictionary, the [`Screener`]
//! proposes candidate MCC/CC entries: exact ICD code matches first, then
//! normalized Levenshtein similarity on names, with exclusion rules and a
//! similarity threshold applied before ranking.

pub mod exclusion;
pub mod normalize;
pub mod prepared;
pub mod rank;
pub mod screen;
pub mod similarity;

pub use exclusion::{is_excluded, parse_exclusions};
pub use normalize::{canonical_code, normalize, normalize_str};
pub use prepared::{PreparedDictionary, PreparedEntry};
pub use rank::{compare_candidates, sort_candidates, truncate_top_k};
pub use screen::{DiagnosisGroup, Screener, ScreeningGroups};
pub use similarity::{levenshtein, similarity};

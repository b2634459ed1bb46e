//! Data model for MCC/CC screening.
//!
//! These types are shared by the matching engine, the dictionary cache and
//! the service facade. Every type here is a plain value: entries and
//! candidates are immutable once built and safe to share across threads.

pub mod candidate;
pub mod config;
pub mod diagnosis;
pub mod dictionary;
pub mod enums;
pub mod error;

pub use candidate::MccCandidate;
pub use config::{ScreeningConfig, validate_threshold};
pub use diagnosis::PatientDiagnosis;
pub use dictionary::DictionaryEntry;
pub use enums::{MatchType, MccType};
pub use error::{ModelError, Result};

//! Screening service for MCC/CC candidates.
//!
//! [`ScreeningService`] ties the pieces together: a [`DictionaryCache`]
//! fed by a [`DictionarySource`], a validated [`ScreeningConfig`], and the
//! matching engine from `mcc-match`. Hosts construct one service and share
//! it across request threads.
//!
//! ```ignore
//! use mcc_service::{ScreeningService, ScreeningSettings};
//!
//! let settings = ScreeningSettings::load("screening.toml".as_ref())?;
//! let service = ScreeningService::from_settings(&settings)?;
//! let groups = service.screen_grouped(&diagnoses)?;
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod logging;
pub mod report;
pub mod service;
pub mod settings;

pub use error::{Result, ServiceError};
pub use report::ScreeningReport;
pub use service::ScreeningService;
pub use settings::{DictionaryFormat, DictionarySettings, ScreeningSettings};

pub use mcc_dictionary::{DictionaryCache, DictionarySource, SnapshotInfo};
pub use mcc_match::{DiagnosisGroup, ScreeningGroups};
pub use mcc_model::{
    DictionaryEntry, MatchType, MccCandidate, MccType, PatientDiagnosis, ScreeningConfig,
};

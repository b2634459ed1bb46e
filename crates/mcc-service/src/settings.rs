//! TOML settings for hosting the screening service.
//!
//! ```toml
//! [screening]
//! similarity_threshold = 0.3
//! exclusion_check_enabled = true
//! top_k_enabled = false
//! top_k_per_diagnosis = 5
//!
//! [dictionary]
//! format = "csv"
//! path = "dictionary/mcc_cc.csv"
//! ```
//!
//! Every key is optional. A relative dictionary path is resolved against
//! the directory of the settings file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use mcc_dictionary::{CsvDictionarySource, DictionarySource, JsonDictionarySource};
use mcc_model::ScreeningConfig;

use crate::error::{Result, ServiceError};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreeningSettings {
    pub screening: ScreeningConfig,
    pub dictionary: Option<DictionarySettings>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DictionarySettings {
    /// Inferred from the file extension when omitted.
    #[serde(default)]
    pub format: Option<DictionaryFormat>,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DictionaryFormat {
    Csv,
    Json,
}

impl DictionarySettings {
    /// The configured format, falling back to the path's extension and then CSV.
    pub fn resolved_format(&self) -> DictionaryFormat {
        self.format.unwrap_or_else(|| {
            let is_json = self
                .path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_json {
                DictionaryFormat::Json
            } else {
                DictionaryFormat::Csv
            }
        })
    }

    pub fn source(&self) -> Box<dyn DictionarySource> {
        match self.resolved_format() {
            DictionaryFormat::Csv => Box::new(CsvDictionarySource::new(&self.path)),
            DictionaryFormat::Json => Box::new(JsonDictionarySource::new(&self.path)),
        }
    }
}

impl ScreeningSettings {
    /// Reads and parses a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ServiceError::SettingsIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut settings = Self::parse(&contents, path)?;
        if let (Some(dictionary), Some(base)) = (settings.dictionary.as_mut(), path.parent()) {
            if dictionary.path.is_relative() {
                dictionary.path = base.join(&dictionary.path);
            }
        }
        Ok(settings)
    }

    /// Parses settings from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ServiceError::Settings {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The screening configuration, validated.
    pub fn screening_config(&self) -> Result<ScreeningConfig> {
        self.screening.validate()?;
        Ok(self.screening)
    }

    pub fn dictionary_source(&self) -> Result<Box<dyn DictionarySource>> {
        self.dictionary
            .as_ref()
            .map(DictionarySettings::source)
            .ok_or(ServiceError::NoDictionarySource)
    }
}

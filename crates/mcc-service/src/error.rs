use std::path::PathBuf;

use thiserror::Error;

use mcc_dictionary::DictionaryError;
use mcc_model::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid screening configuration: {0}")]
    Config(#[from] ModelError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("failed to read settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("settings do not configure a dictionary source")]
    NoDictionarySource,
}

pub type Result<T> = std::result::Result<T, ServiceError>;

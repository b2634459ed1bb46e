#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dictionary CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("dictionary CSV {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("failed to parse dictionary JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dictionary source failed: {source}")]
    Source {
        #[source]
        source: anyhow::Error,
    },

    #[error("dictionary cache lock poisoned")]
    Poisoned,
}

impl DictionaryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wraps an arbitrary collaborator failure, e.g. a database error.
    pub fn source_failed(source: impl Into<anyhow::Error>) -> Self {
        Self::Source {
            source: source.into(),
        }
    }
}

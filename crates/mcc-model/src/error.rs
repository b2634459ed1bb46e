use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("unknown MCC type: {0:?} (expected MCC or CC)")]
    UnknownMccType(String),
    #[error("similarity threshold must be within [0.0, 1.0], got {0}")]
    InvalidThreshold(f64),
    #[error("top_k_per_diagnosis must be at least 1 when top-k is enabled")]
    InvalidTopK,
}

pub type Result<T> = std::result::Result<T, ModelError>;

//! Screening configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Default minimum similarity for a name match to be retained.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;
/// Default group size when Top-K truncation is switched on.
pub const DEFAULT_TOP_K_PER_DIAGNOSIS: usize = 5;

/// Options controlling how candidates are filtered and truncated.
///
/// Supplied by the host's configuration layer and read-only to the engine.
/// Only the threshold can be overridden per call; see
/// [`ScreeningConfig::effective_threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreeningConfig {
    /// Minimum similarity (inclusive) for a candidate to be kept.
    pub similarity_threshold: f64,
    /// Drop candidates whose entry lists the diagnosis code as an exclusion.
    pub exclusion_check_enabled: bool,
    /// Truncate each diagnosis group in the grouped view.
    pub top_k_enabled: bool,
    /// Group size used when `top_k_enabled` is set.
    pub top_k_per_diagnosis: usize,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            exclusion_check_enabled: true,
            top_k_enabled: false,
            top_k_per_diagnosis: DEFAULT_TOP_K_PER_DIAGNOSIS,
        }
    }
}

impl ScreeningConfig {
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_exclusion_check(mut self, enabled: bool) -> Self {
        self.exclusion_check_enabled = enabled;
        self
    }

    /// Enables Top-K truncation of grouped results with the given group size.
    #[must_use]
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k_enabled = true;
        self.top_k_per_diagnosis = k;
        self
    }

    #[must_use]
    pub fn without_top_k(mut self) -> Self {
        self.top_k_enabled = false;
        self
    }

    /// The threshold a call should use: the override when supplied.
    pub fn effective_threshold(&self, override_threshold: Option<f64>) -> f64 {
        override_threshold.unwrap_or(self.similarity_threshold)
    }

    /// Group size limit for the grouped view, or `None` when disabled.
    pub fn top_k(&self) -> Option<usize> {
        self.top_k_enabled.then_some(self.top_k_per_diagnosis)
    }

    /// Checks that the configured values are usable.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.similarity_threshold)?;
        if self.top_k_enabled && self.top_k_per_diagnosis == 0 {
            return Err(ModelError::InvalidTopK);
        }
        Ok(())
    }
}

/// A threshold must be a finite number within `[0.0, 1.0]`.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ModelError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ScreeningConfig::default();
        assert_eq!(config.similarity_threshold, 0.3);
        assert!(config.exclusion_check_enabled);
        assert!(!config.top_k_enabled);
        assert_eq!(config.top_k(), None);
    }

    #[test]
    fn override_wins() {
        let config = ScreeningConfig::default();
        assert_eq!(config.effective_threshold(Some(0.8)), 0.8);
        assert_eq!(config.effective_threshold(None), 0.3);
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert!(ScreeningConfig::default().with_threshold(1.2).validate().is_err());
        assert!(ScreeningConfig::default().with_threshold(f64::NAN).validate().is_err());
        assert!(ScreeningConfig::default().with_top_k(0).validate().is_err());
        assert!(ScreeningConfig::default().with_top_k(3).validate().is_ok());
    }
}

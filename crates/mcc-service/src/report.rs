//! Grouped screening result with summary statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use mcc_match::ScreeningGroups;
use mcc_model::{MccCandidate, MccType};

/// Result of screening one patient, ready for an analysis pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    /// Dictionary version the result was computed against.
    pub snapshot_version: u64,
    /// Threshold actually applied (config value or per-call override).
    pub threshold: f64,
    /// Ranked candidates per diagnosis.
    pub groups: ScreeningGroups,
    /// Diagnoses for which no candidate survived filtering, in input order.
    pub unmatched_diagnoses: Vec<String>,
}

impl ScreeningReport {
    pub(crate) fn new(snapshot_version: u64, threshold: f64, groups: ScreeningGroups) -> Self {
        let unmatched_diagnoses = groups
            .iter()
            .filter(|g| g.candidates.is_empty())
            .map(|g| g.diagnosis.clone())
            .collect();
        Self {
            snapshot_version,
            threshold,
            groups,
            unmatched_diagnoses,
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.groups.candidate_count()
    }

    /// Candidates per severity type.
    #[must_use]
    pub fn count_by_type(&self) -> BTreeMap<MccType, usize> {
        let mut counts = BTreeMap::new();
        for candidate in self.groups.candidates() {
            *counts.entry(candidate.mcc_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Highest similarity across all groups, if any candidate exists.
    #[must_use]
    pub fn max_similarity(&self) -> Option<f64> {
        self.groups
            .candidates()
            .map(MccCandidate::similarity)
            .max_by(f64::total_cmp)
    }

    /// True if any diagnosis produced an MCC candidate.
    pub fn has_mcc(&self) -> bool {
        self.groups.candidates().any(MccCandidate::is_mcc)
    }

    pub fn is_empty(&self) -> bool {
        self.candidate_count() == 0
    }
}

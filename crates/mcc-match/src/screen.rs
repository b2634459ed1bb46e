//! Screening orchestration: the per-diagnosis matching policy.
//!
//! For every (diagnosis, entry) pair, in dictionary order:
//!
//! 1. Exact match: both canonical ICD codes present and equal gives
//!    similarity `1.0` and [`MatchType::CodeMatch`]; fuzzy comparison is
//!    skipped for the pair.
//! 2. Fuzzy fallback: normalized Levenshtein similarity of the names,
//!    [`MatchType::NameMatch`].
//! 3. Exclusion: the entry's exclusion set is checked for the diagnosis code.
//! 4. Threshold: the pair is kept only if `similarity >= threshold` and it is
//!    not excluded. Excluded pairs are dropped, never surfaced as flagged.

use serde::Serialize;

use mcc_model::{MatchType, MccCandidate, PatientDiagnosis, ScreeningConfig};

use crate::normalize::{canonical_code, normalize_str};
use crate::prepared::{PreparedDictionary, PreparedEntry};
use crate::rank::{sort_candidates, truncate_top_k};
use crate::similarity::normalized_similarity;

/// Candidates produced for one diagnosis group, ranked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisGroup {
    /// Group key: the diagnosis name (see [`PatientDiagnosis::group_key`]).
    pub diagnosis: String,
    pub candidates: Vec<MccCandidate>,
}

/// Grouped screening result keyed by diagnosis name.
///
/// Groups keep the order in which their diagnoses were first supplied.
/// Diagnoses sharing a name share a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScreeningGroups {
    groups: Vec<DiagnosisGroup>,
}

impl ScreeningGroups {
    pub fn get(&self, diagnosis: &str) -> Option<&[MccCandidate]> {
        self.groups
            .iter()
            .find(|g| g.diagnosis == diagnosis)
            .map(|g| g.candidates.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosisGroup> {
        self.groups.iter()
    }

    pub fn diagnoses(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.diagnosis.as_str())
    }

    /// Number of groups, including groups without candidates.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total candidates across all groups.
    pub fn candidate_count(&self) -> usize {
        self.groups.iter().map(|g| g.candidates.len()).sum()
    }

    /// All candidates, group by group.
    pub fn candidates(&self) -> impl Iterator<Item = &MccCandidate> {
        self.groups.iter().flat_map(|g| g.candidates.iter())
    }

    pub fn into_groups(self) -> Vec<DiagnosisGroup> {
        self.groups
    }

    fn group_mut(&mut self, diagnosis: String) -> &mut DiagnosisGroup {
        let idx = match self.groups.iter().position(|g| g.diagnosis == diagnosis) {
            Some(idx) => idx,
            None => {
                self.groups.push(DiagnosisGroup {
                    diagnosis,
                    candidates: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx]
    }
}

impl<'a> IntoIterator for &'a ScreeningGroups {
    type Item = &'a DiagnosisGroup;
    type IntoIter = std::slice::Iter<'a, DiagnosisGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Applies the matching policy with a fixed configuration.
///
/// The screener holds no mutable state; one instance can serve any number
/// of concurrent calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Screener {
    config: ScreeningConfig,
}

/// Diagnosis fields canonicalized once per diagnosis.
struct DiagnosisKeys<'d> {
    diagnosis: &'d PatientDiagnosis,
    code: Option<String>,
    name: Option<String>,
}

impl<'d> DiagnosisKeys<'d> {
    fn new(diagnosis: &'d PatientDiagnosis) -> Self {
        Self {
            diagnosis,
            code: canonical_code(diagnosis.icd_code()),
            name: diagnosis
                .diagnosis_name()
                .map(normalize_str)
                .filter(|n| !n.is_empty()),
        }
    }
}

impl Screener {
    pub fn new(config: ScreeningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Screens all diagnoses and returns every retained candidate, ranked.
    ///
    /// The flat view is never Top-K truncated.
    pub fn screen(
        &self,
        dictionary: &PreparedDictionary,
        diagnoses: &[PatientDiagnosis],
        threshold_override: Option<f64>,
    ) -> Vec<MccCandidate> {
        let threshold = self.config.effective_threshold(threshold_override);
        let candidates: Vec<MccCandidate> = diagnoses
            .iter()
            .flat_map(|d| self.match_diagnosis(dictionary, d, threshold))
            .collect();
        tracing::debug!(
            diagnoses = diagnoses.len(),
            entries = dictionary.len(),
            candidates = candidates.len(),
            threshold,
            "flat screening complete"
        );
        sort_candidates(candidates)
    }

    /// Screens all diagnoses and returns ranked candidates per diagnosis.
    ///
    /// Every supplied diagnosis gets a group, even when nothing matched.
    /// With Top-K enabled each group keeps at most `top_k_per_diagnosis`
    /// candidates.
    pub fn screen_grouped(
        &self,
        dictionary: &PreparedDictionary,
        diagnoses: &[PatientDiagnosis],
        threshold_override: Option<f64>,
    ) -> ScreeningGroups {
        let threshold = self.config.effective_threshold(threshold_override);
        let mut groups = ScreeningGroups::default();
        for diagnosis in diagnoses {
            let matched = self.match_diagnosis(dictionary, diagnosis, threshold);
            groups
                .group_mut(diagnosis.group_key())
                .candidates
                .extend(matched);
        }

        for group in &mut groups.groups {
            let ranked = sort_candidates(std::mem::take(&mut group.candidates));
            group.candidates = match self.config.top_k() {
                Some(k) => truncate_top_k(ranked, k),
                None => ranked,
            };
        }

        tracing::debug!(
            diagnoses = diagnoses.len(),
            groups = groups.len(),
            candidates = groups.candidate_count(),
            threshold,
            top_k = ?self.config.top_k(),
            "grouped screening complete"
        );
        groups
    }

    /// Candidates for one diagnosis, in dictionary order.
    pub fn match_diagnosis(
        &self,
        dictionary: &PreparedDictionary,
        diagnosis: &PatientDiagnosis,
        threshold: f64,
    ) -> Vec<MccCandidate> {
        let keys = DiagnosisKeys::new(diagnosis);
        dictionary
            .iter()
            .filter_map(|entry| self.evaluate(&keys, entry, threshold))
            .collect()
    }

    fn evaluate(
        &self,
        keys: &DiagnosisKeys<'_>,
        entry: &PreparedEntry,
        threshold: f64,
    ) -> Option<MccCandidate> {
        let (similarity, match_type) = match (keys.code.as_deref(), entry.canonical_code()) {
            (Some(code), Some(entry_code)) if code == entry_code => (1.0, MatchType::CodeMatch),
            _ => {
                // Blank names cannot be compared; a zero score must not pass a zero threshold.
                let (Some(name), Some(entry_name)) =
                    (keys.name.as_deref(), entry.normalized_name())
                else {
                    return None;
                };
                (
                    normalized_similarity(name, entry_name),
                    MatchType::NameMatch,
                )
            }
        };

        let excluded = self.config.exclusion_check_enabled
            && keys.code.as_deref().is_some_and(|code| entry.excludes(code));

        // A NaN threshold admits nothing.
        let passes = similarity >= threshold;
        if !passes || excluded {
            return None;
        }

        Some(MccCandidate::new(
            entry.entry(),
            similarity,
            match_type,
            excluded,
            keys.diagnosis.diagnosis_name(),
            keys.diagnosis.icd_code(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcc_model::{DictionaryEntry, MccType};

    fn dictionary(entries: Vec<DictionaryEntry>) -> PreparedDictionary {
        PreparedDictionary::new(entries)
    }

    #[test]
    fn test_code_match_short_circuits_name() {
        let dict = dictionary(vec![DictionaryEntry::new(
            1,
            "I48.000",
            "完全不同的名称",
            None,
            MccType::Mcc,
        )]);
        let screener = Screener::new(ScreeningConfig::default());
        let diagnosis = PatientDiagnosis::new(" i48.000 ", "心房颤动");
        let result = screener.screen(&dict, &[diagnosis], None);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].similarity(), 1.0);
        assert_eq!(result[0].match_type(), MatchType::CodeMatch);
    }

    #[test]
    fn test_blank_name_never_matches_even_at_zero_threshold() {
        let dict = dictionary(vec![DictionaryEntry::new(
            1,
            "I50.000",
            "心力衰竭",
            None,
            MccType::Mcc,
        )]);
        let screener = Screener::new(ScreeningConfig::default());
        let diagnosis = PatientDiagnosis {
            icd_code: None,
            diagnosis_name: Some("  ".to_string()),
        };
        assert!(screener.screen(&dict, &[diagnosis], Some(0.0)).is_empty());
    }

    #[test]
    fn test_nan_threshold_admits_nothing() {
        let dict = dictionary(vec![
            DictionaryEntry::new(1, "J18.900", "肺炎", None, MccType::Cc),
            DictionaryEntry::new(2, "S72.000", "股骨骨折", None, MccType::Mcc),
        ]);
        let screener = Screener::new(ScreeningConfig::default());
        let diagnoses = [
            PatientDiagnosis::new("Z00.000", "骨折"),
            PatientDiagnosis::new("S72.000", "股骨骨折"),
        ];
        assert!(screener.screen(&dict, &diagnoses, Some(f64::NAN)).is_empty());
        let groups = screener.screen_grouped(&dict, &diagnoses, Some(f64::NAN));
        assert_eq!(groups.candidate_count(), 0);
    }

    #[test]
    fn test_excluded_flag_never_surfaces() {
        let dict = dictionary(vec![DictionaryEntry::new(
            1,
            "I50.000",
            "心房颤动",
            Some("I48.000"),
            MccType::Mcc,
        )]);
        let diagnosis = PatientDiagnosis::new("I48.000", "心房颤动");

        let enabled = Screener::new(ScreeningConfig::default());
        assert!(enabled.screen(&dict, &[diagnosis.clone()], None).is_empty());

        let disabled = Screener::new(ScreeningConfig::default().with_exclusion_check(false));
        let result = disabled.screen(&dict, &[diagnosis], None);
        assert_eq!(result.len(), 1);
        assert!(!result[0].excluded());
    }

    #[test]
    fn test_grouped_keeps_empty_groups_in_input_order() {
        let dict = dictionary(vec![DictionaryEntry::new(
            1,
            "I50.000",
            "心力衰竭",
            None,
            MccType::Mcc,
        )]);
        let screener = Screener::new(ScreeningConfig::default());
        let groups = screener.screen_grouped(
            &dict,
            &[
                PatientDiagnosis::new("Z99.999", "无关诊断"),
                PatientDiagnosis::new("I50.000", "心力衰竭"),
            ],
            None,
        );
        let names: Vec<&str> = groups.diagnoses().collect();
        assert_eq!(names, vec!["无关诊断", "心力衰竭"]);
        assert_eq!(groups.get("无关诊断").map(<[MccCandidate]>::len), Some(0));
        assert_eq!(groups.get("心力衰竭").map(<[MccCandidate]>::len), Some(1));
    }
}

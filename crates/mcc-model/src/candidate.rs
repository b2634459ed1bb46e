//! Screening output.

use serde::Serialize;

use crate::dictionary::DictionaryEntry;
use crate::enums::{MatchType, MccType};

/// A dictionary entry proposed for one patient diagnosis.
///
/// Candidates copy what they need from the entry and the diagnosis, so a
/// result set stays valid after the dictionary snapshot that produced it is
/// replaced. Fields are private; a candidate is never modified after it is
/// built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MccCandidate {
    mcc_code: String,
    mcc_name: String,
    mcc_type: MccType,
    similarity: f64,
    match_type: MatchType,
    excluded: bool,
    source_diagnosis: String,
    source_icd_code: String,
}

impl MccCandidate {
    /// Builds a candidate from the matched entry and the diagnosis fields.
    ///
    /// `similarity` is clamped into `[0.0, 1.0]`; NaN becomes `0.0`.
    pub fn new(
        entry: &DictionaryEntry,
        similarity: f64,
        match_type: MatchType,
        excluded: bool,
        source_diagnosis: Option<&str>,
        source_icd_code: Option<&str>,
    ) -> Self {
        let similarity = if similarity.is_nan() {
            0.0
        } else {
            similarity.clamp(0.0, 1.0)
        };
        Self {
            mcc_code: entry.code().unwrap_or_default().trim().to_string(),
            mcc_name: entry.name().unwrap_or_default().trim().to_string(),
            mcc_type: entry.mcc_type,
            similarity,
            match_type,
            excluded,
            source_diagnosis: source_diagnosis.unwrap_or_default().trim().to_string(),
            source_icd_code: source_icd_code.unwrap_or_default().trim().to_string(),
        }
    }

    pub fn mcc_code(&self) -> &str {
        &self.mcc_code
    }

    pub fn mcc_name(&self) -> &str {
        &self.mcc_name
    }

    pub fn mcc_type(&self) -> MccType {
        self.mcc_type
    }

    pub fn similarity(&self) -> f64 {
        self.similarity
    }

    pub fn match_type(&self) -> MatchType {
        self.match_type
    }

    pub fn excluded(&self) -> bool {
        self.excluded
    }

    pub fn source_diagnosis(&self) -> &str {
        &self.source_diagnosis
    }

    pub fn source_icd_code(&self) -> &str {
        &self.source_icd_code
    }

    pub fn is_mcc(&self) -> bool {
        self.mcc_type == MccType::Mcc
    }

    /// One-line human summary, e.g. `MCC I50.000 心力衰竭 (NAME_MATCH 62%)`.
    pub fn describe(&self) -> String {
        format!(
            "{} {} {} ({} {:.0}%)",
            self.mcc_type,
            self.mcc_code,
            self.mcc_name,
            self.match_type,
            self.similarity * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> DictionaryEntry {
        DictionaryEntry::new(1, " I50.000 ", "心力衰竭", None, MccType::Mcc)
    }

    #[test]
    fn similarity_is_clamped() {
        let high = MccCandidate::new(&entry(), 1.4, MatchType::NameMatch, false, None, None);
        assert_eq!(high.similarity(), 1.0);
        let nan = MccCandidate::new(&entry(), f64::NAN, MatchType::NameMatch, false, None, None);
        assert_eq!(nan.similarity(), 0.0);
    }

    #[test]
    fn describe_renders_percentage() {
        let candidate = MccCandidate::new(
            &entry(),
            0.62,
            MatchType::NameMatch,
            false,
            Some("心力衰竭"),
            Some("I50.900"),
        );
        assert_eq!(candidate.describe(), "MCC I50.000 心力衰竭 (NAME_MATCH 62%)");
    }

    #[test]
    fn serializes_camel_case() {
        let candidate = MccCandidate::new(
            &entry(),
            1.0,
            MatchType::CodeMatch,
            false,
            Some("心房颤动"),
            Some("I48.000"),
        );
        let value = serde_json::to_value(&candidate).unwrap();
        assert_eq!(value["mccCode"], "I50.000");
        assert_eq!(value["matchType"], "CODE_MATCH");
        assert_eq!(value["sourceIcdCode"], "I48.000");
    }
}

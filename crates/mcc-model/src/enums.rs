//! Type-safe enumerations for screening concepts.
//!
//! The dictionary stores these as strings; parsing happens once at load time
//! so the matching engine never compares raw text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Severity category of a dictionary entry.
///
/// Declaration order is rank order: `Mcc` sorts before `Cc`, which is the
/// tie-break used when two candidates share a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MccType {
    /// Major Complication/Comorbidity.
    #[serde(rename = "MCC", alias = "mcc")]
    Mcc,
    /// Complication/Comorbidity.
    #[serde(rename = "CC", alias = "cc")]
    Cc,
}

impl MccType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MccType::Mcc => "MCC",
            MccType::Cc => "CC",
        }
    }

    /// Rank used for tie-breaking; lower ranks first.
    pub fn rank(&self) -> u8 {
        match self {
            MccType::Mcc => 0,
            MccType::Cc => 1,
        }
    }
}

impl fmt::Display for MccType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MccType {
    type Err = ModelError;

    /// Case-insensitive, whitespace-tolerant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "MCC" => Ok(MccType::Mcc),
            "CC" => Ok(MccType::Cc),
            _ => Err(ModelError::UnknownMccType(s.to_string())),
        }
    }
}

/// How a candidate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    /// ICD codes matched exactly (after trimming and case folding).
    CodeMatch,
    /// Names matched by normalized edit-distance similarity.
    NameMatch,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::CodeMatch => "CODE_MATCH",
            MatchType::NameMatch => "NAME_MATCH",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mcc_type_parses_case_insensitively() {
        assert_eq!(" mcc ".parse::<MccType>().unwrap(), MccType::Mcc);
        assert_eq!("Cc".parse::<MccType>().unwrap(), MccType::Cc);
        assert!("major".parse::<MccType>().is_err());
    }

    #[test]
    fn mcc_ranks_before_cc() {
        assert!(MccType::Mcc < MccType::Cc);
        assert!(MccType::Mcc.rank() < MccType::Cc.rank());
    }

    #[test]
    fn match_type_serializes_screaming_case() {
        let json = serde_json::to_string(&MatchType::CodeMatch).unwrap();
        assert_eq!(json, "\"CODE_MATCH\"");
        let json = serde_json::to_string(&MccType::Cc).unwrap();
        assert_eq!(json, "\"CC\"");
    }
}

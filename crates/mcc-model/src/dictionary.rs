use serde::{Deserialize, Serialize};

use crate::enums::MccType;

/// A row of the MCC/CC reference dictionary.
///
/// `exclusion_raw` is the free-text exclusion field exactly as maintained by
/// coders; it may list several ICD codes separated by commas, semicolons or
/// whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: i64,
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(default, alias = "exclusion")]
    pub exclusion_raw: Option<String>,
    #[serde(rename = "type")]
    pub mcc_type: MccType,
}

impl DictionaryEntry {
    pub fn new(
        id: i64,
        code: impl Into<String>,
        name: impl Into<String>,
        exclusion_raw: Option<&str>,
        mcc_type: MccType,
    ) -> Self {
        Self {
            id,
            code: Some(code.into()),
            name: Some(name.into()),
            exclusion_raw: exclusion_raw.map(String::from),
            mcc_type,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn exclusion_raw(&self) -> Option<&str> {
        self.exclusion_raw.as_deref()
    }

    pub fn has_code(&self) -> bool {
        is_present(self.code.as_deref())
    }

    pub fn has_name(&self) -> bool {
        is_present(self.name.as_deref())
    }

    /// An entry with neither a code nor a name can never produce a candidate.
    pub fn is_usable(&self) -> bool {
        self.has_code() || self.has_name()
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_code_and_name_is_unusable() {
        let entry = DictionaryEntry {
            id: 1,
            code: Some("  ".to_string()),
            name: None,
            exclusion_raw: None,
            mcc_type: MccType::Cc,
        };
        assert!(!entry.has_code());
        assert!(!entry.is_usable());
    }

    #[test]
    fn deserializes_type_and_exclusion_alias() {
        let json = r#"{"id": 7, "code": "I50.000", "name": "心力衰竭", "exclusion": "I48.000", "type": "MCC"}"#;
        let entry: DictionaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mcc_type, MccType::Mcc);
        assert_eq!(entry.exclusion_raw(), Some("I48.000"));
    }

    #[test]
    fn missing_exclusion_defaults_to_none() {
        let json = r#"{"id": 2, "code": "J18.900", "name": "肺炎", "type": "cc"}"#;
        let entry: DictionaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.exclusion_raw, None);
        assert_eq!(entry.mcc_type, MccType::Cc);
    }
}

use serde::{Deserialize, Serialize};

/// One diagnosis from a patient record, supplied per screening call.
///
/// Either field may be missing; the screener treats absent and blank values
/// the same way and never errors on them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDiagnosis {
    pub icd_code: Option<String>,
    pub diagnosis_name: Option<String>,
}

impl PatientDiagnosis {
    pub fn new(icd_code: impl Into<String>, diagnosis_name: impl Into<String>) -> Self {
        Self {
            icd_code: Some(icd_code.into()),
            diagnosis_name: Some(diagnosis_name.into()),
        }
    }

    pub fn icd_code(&self) -> Option<&str> {
        self.icd_code.as_deref()
    }

    pub fn diagnosis_name(&self) -> Option<&str> {
        self.diagnosis_name.as_deref()
    }

    /// Key used to group candidates for this diagnosis.
    ///
    /// The trimmed name when present, otherwise the trimmed ICD code,
    /// otherwise `<unnamed>`.
    pub fn group_key(&self) -> String {
        non_blank(self.diagnosis_name.as_deref())
            .or_else(|| non_blank(self.icd_code.as_deref()))
            .unwrap_or("<unnamed>")
            .to_string()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

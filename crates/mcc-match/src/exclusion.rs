//! Exclusion rules attached to dictionary entries.
//!
//! Coders maintain the exclusion field as free text. A diagnosis whose ICD
//! code appears in an entry's exclusion list must not be proposed that
//! entry.

use std::collections::BTreeSet;

use mcc_model::DictionaryEntry;

use crate::normalize::canonical_code;

/// Parses a raw exclusion field into canonical ICD codes.
///
/// Tokens are separated by commas, semicolons (ASCII or full-width) or any
/// whitespace run. Empty tokens are discarded; `None` or blank input yields
/// an empty set.
pub fn parse_exclusions(raw: Option<&str>) -> BTreeSet<String> {
    let Some(raw) = raw else {
        return BTreeSet::new();
    };
    raw.split(is_separator)
        .filter_map(|token| canonical_code(Some(token)))
        .collect()
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | ';' | '，' | '；' | '、') || c.is_whitespace()
}

/// Returns true when `entry` excludes the diagnosis code.
///
/// Always false when the check is disabled, when the code or entry is
/// absent, or when the entry has no exclusions. Comparison is trimmed and
/// case-insensitive.
pub fn is_excluded(
    diagnosis_icd_code: Option<&str>,
    entry: Option<&DictionaryEntry>,
    exclusion_check_enabled: bool,
) -> bool {
    if !exclusion_check_enabled {
        return false;
    }
    let (Some(code), Some(entry)) = (canonical_code(diagnosis_icd_code), entry) else {
        return false;
    };
    parse_exclusions(entry.exclusion_raw()).contains(&code)
}

//! Text canonicalization shared by every comparison in the engine.

/// Normalizes a name for comparison.
///
/// - `None` becomes the empty string
/// - Converts to lowercase
/// - Trims and collapses internal whitespace runs to one space
pub fn normalize(name: Option<&str>) -> String {
    name.map(normalize_str).unwrap_or_default()
}

/// [`normalize`] for a present value.
pub fn normalize_str(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical form of an ICD code: trimmed and upper-cased.
///
/// Returns `None` for absent or blank codes, which can never match.
pub fn canonical_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_collapses_whitespace() {
        assert_eq!(normalize_str("  Acute   Heart\tFailure "), "acute heart failure");
        assert_eq!(normalize(Some("心房颤动\u{3000}")), "心房颤动");
    }

    #[test]
    fn none_and_blank_are_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("   ")), "");
    }

    #[test]
    fn canonical_code_trims_and_uppercases() {
        assert_eq!(canonical_code(Some(" i48.000 ")), Some("I48.000".to_string()));
        assert_eq!(canonical_code(Some("  ")), None);
        assert_eq!(canonical_code(None), None);
    }
}

//! Normalized edit-distance similarity between diagnosis names.
//!
//! The score is `1 - d / max(len_a, len_b)` where `d` is the Levenshtein
//! distance between the normalized strings. Lengths count Unicode scalar
//! values, so a Chinese diagnosis name of four characters has length four.

use rapidfuzz::distance::levenshtein as edit_distance;

use crate::normalize::normalize_str;

/// Similarity in `[0.0, 1.0]` between two names.
///
/// An absent input scores `0.0` without computing a distance, and two
/// names that are both empty after normalization also score `0.0`: empty
/// text is never a match.
pub fn similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    normalized_similarity(&normalize_str(a), &normalize_str(b))
}

/// Similarity of two already-normalized strings.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}

/// Levenshtein distance over Unicode scalar values; every edit costs 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    edit_distance::distance(a.chars(), b.chars())
}

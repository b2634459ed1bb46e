//! Candidate ordering and Top-K truncation.

use std::cmp::Ordering;

use mcc_model::MccCandidate;

/// Ranking order: similarity descending, then `MCC` before `CC`.
///
/// Candidates equal on both keys compare `Equal`, so a stable sort keeps
/// them in dictionary order.
pub fn compare_candidates(a: &MccCandidate, b: &MccCandidate) -> Ordering {
    b.similarity()
        .total_cmp(&a.similarity())
        .then_with(|| a.mcc_type().rank().cmp(&b.mcc_type().rank()))
}

/// Sorts candidates by [`compare_candidates`]. The sort is stable.
pub fn sort_candidates(mut candidates: Vec<MccCandidate>) -> Vec<MccCandidate> {
    candidates.sort_by(compare_candidates);
    candidates
}

/// Keeps the first `k` candidates; shorter lists are returned unchanged.
pub fn truncate_top_k(mut candidates: Vec<MccCandidate>, k: usize) -> Vec<MccCandidate> {
    candidates.truncate(k);
    candidates
}

use std::cmp::Ordering;

use crate::domain::candidate::ScoredCandidate;

/// Order candidates by score, best first.
///
/// Equal scores keep their input order, so the outcome is independent of the
/// order in which parallel scoring finished.
pub fn rank(mut scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.position.cmp(&b.position))
    });
    scored
}

use crate::domain::candidate::{ScoredCandidate, Status};

/// Batch threshold derived from the scores of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub mean: f64,
}

impl Classification {
    /// Scores at or above the mean are selected.
    pub fn status_of(&self, score: f64) -> Status {
        if score >= self.mean {
            Status::Selected
        } else {
            Status::NotSelected
        }
    }
}

/// Population mean of all scored candidates.
///
/// Returns `None` for an empty batch instead of dividing by zero.
pub fn batch_mean(scored: &[ScoredCandidate]) -> Option<f64> {
    if scored.is_empty() {
        return None;
    }
    let total: f64 = scored.iter().map(|candidate| candidate.score).sum();
    Some(total / scored.len() as f64)
}

pub fn classify(scored: &[ScoredCandidate]) -> Option<Classification> {
    let mean = batch_mean(scored)?;
    log::debug!("Batch mean over {} candidates: {mean:.4}", scored.len());
    Some(Classification { mean })
}

use serde::Serialize;

use crate::domain::candidate::{ScoredCandidate, Status};
use crate::processing::classify::classify;
use crate::processing::rank::rank;

/// A classified candidate in its final ranked position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    #[serde(rename = "candidate")]
    pub name: String,
    #[serde(rename = "match_percent")]
    pub score: f64,
    pub status: Status,
}

/// Ranked results of one run together with the batch mean.
///
/// Built once from the scored candidates and never mutated afterwards. An
/// empty set carries no mean and stands for the "no valid candidates"
/// outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    entries: Vec<RankedCandidate>,
    mean: Option<f64>,
}

impl ResultSet {
    /// Classifies `scored` against its own mean and ranks the outcome.
    pub fn from_scored(scored: Vec<ScoredCandidate>) -> Self {
        let Some(classification) = classify(&scored) else {
            return Self::empty();
        };

        let entries = rank(scored)
            .into_iter()
            .map(|candidate| RankedCandidate {
                status: classification.status_of(candidate.score),
                name: candidate.name,
                score: candidate.score,
            })
            .collect();

        Self {
            entries,
            mean: Some(classification.mean),
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            mean: None,
        }
    }

    pub fn entries(&self) -> &[RankedCandidate] {
        &self.entries
    }

    /// Batch mean over every scored candidate, absent when nothing was scored.
    pub fn mean(&self) -> Option<f64> {
        self.mean
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_valid_candidates(&self) -> bool {
        !self.is_empty()
    }
}

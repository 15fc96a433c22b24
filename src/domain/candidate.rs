use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Reason a secondary source (interview transcript) could not be used.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SecondaryError {
    #[error("transcript unavailable: {0}")]
    Unavailable(String),
    #[error("transcript timed out after {0:?}")]
    TimedOut(Duration),
}

/// Secondary text for a candidate, or the failure that prevented loading it.
pub type SecondaryResult = Result<String, SecondaryError>;

/// One candidate slot as supplied by the caller, before any scoring.
///
/// A slot without `primary` is skipped by the pipeline and never reaches the
/// result set.
#[derive(Debug, Clone)]
pub struct CandidateInput {
    pub name: String,
    pub primary: Option<String>,
    pub secondary: Option<SecondaryResult>,
}

impl CandidateInput {
    pub fn new(name: impl Into<String>, primary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary: Some(primary.into()),
            secondary: None,
        }
    }

    /// A slot whose primary document was never supplied.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary: None,
            secondary: None,
        }
    }

    pub fn with_secondary(mut self, secondary: SecondaryResult) -> Self {
        self.secondary = Some(secondary);
        self
    }
}

/// Selection outcome relative to the batch mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "Selected")]
    Selected,
    #[serde(rename = "Not Selected")]
    NotSelected,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Selected => "Selected",
            Status::NotSelected => "Not Selected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate that made it through embedding and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// Position of the candidate in the input list.
    pub position: usize,
    pub name: String,
    pub score: f64,
}

/// Non-fatal problem attributed to a single candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateWarning {
    pub candidate: String,
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Transcript failed; the candidate was scored on the primary text only.
    SecondarySourceFailed,
    /// Primary document was listed but could not be read; candidate skipped.
    PrimaryUnreadable,
    /// Embedding or similarity failed; candidate excluded from the results.
    ScoreComputation,
}

impl CandidateWarning {
    pub fn new(candidate: &str, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            candidate: candidate.to_string(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for CandidateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.candidate, self.message)
    }
}

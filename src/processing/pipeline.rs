use std::sync::Arc;

use futures::future;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::domain::candidate::{CandidateInput, CandidateWarning, ScoredCandidate, WarningKind};
use crate::domain::result::ResultSet;
use crate::processing::combine::combine;
use crate::processing::embedding::{EmbeddingError, EmbeddingProvider};
use crate::processing::normalize::normalize;
use crate::processing::scoring::score;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("reference document text is missing or empty")]
    EmptyReference,
    #[error("failed to embed reference document: {0}")]
    ReferenceEmbedding(#[source] EmbeddingError),
    #[error("background task failed: {0}")]
    Task(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Ranked results of one run and every non-fatal warning raised on the way.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub results: ResultSet,
    pub warnings: Vec<CandidateWarning>,
}

#[derive(Debug, Default)]
struct CandidateOutcome {
    scored: Option<ScoredCandidate>,
    warnings: Vec<CandidateWarning>,
}

/// Combine, normalize, embed and score a single candidate.
fn evaluate(
    provider: &dyn EmbeddingProvider,
    reference: &[f32],
    position: usize,
    input: CandidateInput,
    primary: String,
) -> CandidateOutcome {
    let mut outcome = CandidateOutcome::default();
    let name = input.name;

    let (combined, secondary_failure) = combine(&primary, input.secondary.as_ref());
    if let Some(error) = secondary_failure {
        log::warn!("Error processing transcript for {name}: {error}");
        outcome.warnings.push(CandidateWarning::new(
            &name,
            WarningKind::SecondarySourceFailed,
            format!("{error}; scored on primary document only"),
        ));
    }

    let embedding = match provider.embed(&normalize(&combined)) {
        Ok(embedding) => embedding,
        Err(error) => {
            log::warn!("Failed to embed {name}: {error}");
            outcome.warnings.push(CandidateWarning::new(
                &name,
                WarningKind::ScoreComputation,
                format!("{error}; candidate excluded"),
            ));
            return outcome;
        }
    };

    match score(reference, &embedding) {
        Ok(value) => {
            log::debug!("Scored {name}: {value:.4}");
            outcome.scored = Some(ScoredCandidate {
                position,
                name,
                score: value,
            });
        }
        Err(error) => {
            log::warn!("Failed to score {name}: {error}");
            outcome.warnings.push(CandidateWarning::new(
                &name,
                WarningKind::ScoreComputation,
                format!("{error}; candidate excluded"),
            ));
        }
    }

    outcome
}

/// Scores a batch of candidates against one reference document.
///
/// Candidate work runs on the blocking pool, at most `max_parallel` at a
/// time, and is joined before classification and ranking.
#[derive(Clone)]
pub struct Pipeline {
    provider: Arc<dyn EmbeddingProvider>,
    permits: Arc<Semaphore>,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, max_parallel: usize) -> Self {
        Self {
            provider,
            permits: Arc::new(Semaphore::new(max_parallel.max(1))),
        }
    }

    async fn embed_reference(&self, reference: &str) -> PipelineResult<Arc<Vec<f32>>> {
        let provider = Arc::clone(&self.provider);
        let normalized = normalize(reference);
        let embedding = tokio::task::spawn_blocking(move || provider.embed(&normalized))
            .await
            .map_err(|error| PipelineError::Task(error.to_string()))?
            .map_err(PipelineError::ReferenceEmbedding)?;
        Ok(Arc::new(embedding))
    }

    async fn evaluate_candidate(
        &self,
        reference: Arc<Vec<f32>>,
        position: usize,
        input: CandidateInput,
        primary: String,
    ) -> CandidateOutcome {
        let name = input.name.clone();
        let permit = match Arc::clone(&self.permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(error) => {
                return CandidateOutcome {
                    scored: None,
                    warnings: vec![CandidateWarning::new(
                        &name,
                        WarningKind::ScoreComputation,
                        error.to_string(),
                    )],
                };
            }
        };

        let provider = Arc::clone(&self.provider);
        let task = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            evaluate(provider.as_ref(), &reference, position, input, primary)
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(error) => {
                log::error!("Scoring task for {name} failed: {error}");
                CandidateOutcome {
                    scored: None,
                    warnings: vec![CandidateWarning::new(
                        &name,
                        WarningKind::ScoreComputation,
                        format!("scoring task failed: {error}"),
                    )],
                }
            }
        }
    }

    /// Run the whole batch.
    ///
    /// An empty reference or a reference that cannot be embedded aborts the
    /// run before any candidate is touched. Everything that goes wrong for a
    /// single candidate ends up in [`RunReport::warnings`].
    pub async fn run(
        &self,
        reference: &str,
        candidates: Vec<CandidateInput>,
    ) -> PipelineResult<RunReport> {
        if reference.trim().is_empty() {
            return Err(PipelineError::EmptyReference);
        }

        let reference = self.embed_reference(reference).await?;
        log::info!(
            "Embedded reference document (dimension {})",
            reference.len()
        );

        let tasks = candidates
            .into_iter()
            .enumerate()
            .filter_map(|(position, mut input)| {
                let Some(primary) = input.primary.take() else {
                    log::debug!("Skipping {}: no primary document", input.name);
                    return None;
                };
                Some(self.evaluate_candidate(Arc::clone(&reference), position, input, primary))
            });

        let (scored, warnings) = future::join_all(tasks).await.into_iter().fold(
            (Vec::new(), Vec::new()),
            |(mut scored, mut warnings), outcome| {
                scored.extend(outcome.scored);
                warnings.extend(outcome.warnings);
                (scored, warnings)
            },
        );

        let results = ResultSet::from_scored(scored);
        match results.mean() {
            Some(mean) => log::info!(
                "Ranked {} candidates, average score {mean:.2}",
                results.len()
            ),
            None => log::warn!("No valid candidates to classify"),
        }

        Ok(RunReport { results, warnings })
    }
}

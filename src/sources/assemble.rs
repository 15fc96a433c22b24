use std::path::Path;
use std::time::Duration;

use futures::future;

use crate::domain::candidate::{
    CandidateInput, CandidateWarning, SecondaryError, SecondaryResult, WarningKind,
};
use crate::models::manifest::BatchManifest;
use crate::sources::DocumentSource;

/// Candidate inputs ready for the pipeline, plus problems found while
/// loading them.
#[derive(Debug, Default)]
pub struct AssembledBatch {
    pub candidates: Vec<CandidateInput>,
    pub warnings: Vec<CandidateWarning>,
}

async fn load_secondary<S>(source: &S, path: &Path, timeout: Duration) -> SecondaryResult
where
    S: DocumentSource + ?Sized,
{
    match tokio::time::timeout(timeout, source.load(path)).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(error)) => Err(SecondaryError::Unavailable(error.to_string())),
        Err(_) => Err(SecondaryError::TimedOut(timeout)),
    }
}

async fn load_entry<S>(
    manifest: &BatchManifest,
    index: usize,
    source: &S,
    timeout: Duration,
) -> (CandidateInput, Option<CandidateWarning>)
where
    S: DocumentSource + ?Sized,
{
    let name = manifest.display_name(index);
    let entry = &manifest.candidates[index];

    let Some(resume) = &entry.resume else {
        return (CandidateInput::absent(name), None);
    };

    let primary = match source.load(resume).await {
        Ok(text) => text,
        Err(error) => {
            log::warn!("Skipping {name}: {error}");
            let warning = CandidateWarning::new(
                &name,
                WarningKind::PrimaryUnreadable,
                format!("{error}; candidate skipped"),
            );
            return (CandidateInput::absent(name), Some(warning));
        }
    };

    let mut input = CandidateInput::new(name, primary);
    if manifest.include_secondary
        && let Some(transcript) = &entry.transcript
    {
        input = input.with_secondary(load_secondary(source, transcript, timeout).await);
    }
    (input, None)
}

/// Load every candidate listed in `manifest`, concurrently.
///
/// Slots keep manifest order. Transcript loading is bounded by `timeout` and
/// its failures are carried on the candidate rather than aborting the batch.
pub async fn assemble_candidates<S>(
    manifest: &BatchManifest,
    source: &S,
    timeout: Duration,
) -> AssembledBatch
where
    S: DocumentSource + ?Sized,
{
    let loads = (0..manifest.candidates.len())
        .map(|index| load_entry(manifest, index, source, timeout));

    future::join_all(loads)
        .await
        .into_iter()
        .fold(AssembledBatch::default(), |mut batch, (input, warning)| {
            batch.candidates.push(input);
            batch.warnings.extend(warning);
            batch
        })
}

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub mod assemble;
pub mod text_file;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("{path} contains no text")]
    Empty { path: String },
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Supplies plain text extracted from a document on disk.
///
/// Format-specific extraction (PDF parsing, speech-to-text) lives behind this
/// trait; the pipeline only ever sees the resulting strings.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load(&self, path: &Path) -> SourceResult<String>;
}

/// Load the reference document, rejecting blank text.
pub async fn load_reference<S>(source: &S, path: &Path) -> SourceResult<String>
where
    S: DocumentSource + ?Sized,
{
    let text = source.load(path).await?;
    if text.trim().is_empty() {
        return Err(SourceError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(text)
}

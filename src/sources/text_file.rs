use std::path::Path;

use async_trait::async_trait;

use crate::sources::{DocumentSource, SourceError, SourceResult};

/// Reads already-extracted UTF-8 text files.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFileSource;

#[async_trait]
impl DocumentSource for TextFileSource {
    async fn load(&self, path: &Path) -> SourceResult<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|error| SourceError::Read {
                path: path.display().to_string(),
                message: error.to_string(),
            })
    }
}

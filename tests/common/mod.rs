//! Helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use talentmatch::processing::embedding::{EmbeddingProvider, EmbeddingResult};
use talentmatch::sources::{DocumentSource, SourceError, SourceResult};

fn bucket(token: &str, dimension: usize) -> usize {
    let hash = token
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        });
    (hash % dimension as u64) as usize
}

/// Deterministic bag-of-words embedder standing in for the ONNX model.
///
/// Text without tokens maps to a fixed unit vector so `embed("")` is valid.
/// Any text containing `degenerate` yields a zero vector.
pub struct BagOfWordsEmbedder {
    dimension: usize,
}

impl BagOfWordsEmbedder {
    pub fn new() -> Self {
        Self { dimension: 256 }
    }

    pub fn shared() -> Arc<dyn EmbeddingProvider> {
        Arc::new(Self::new())
    }
}

impl EmbeddingProvider for BagOfWordsEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let mut vector = vec![0.0_f32; self.dimension];
        if text.contains("degenerate") {
            return Ok(vector);
        }
        let mut any = false;
        for token in text.split_whitespace() {
            vector[bucket(token, self.dimension)] += 1.0;
            any = true;
        }
        if !any {
            vector[0] = 1.0;
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

enum Scripted {
    Text(String),
    Fail(String),
    Slow(Duration, String),
}

/// In-memory document source with scripted failures and delays.
#[derive(Default)]
pub struct ScriptedSource {
    documents: HashMap<PathBuf, Scripted>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, path: &str, text: &str) -> Self {
        self.documents
            .insert(PathBuf::from(path), Scripted::Text(text.to_string()));
        self
    }

    pub fn failing(mut self, path: &str, message: &str) -> Self {
        self.documents
            .insert(PathBuf::from(path), Scripted::Fail(message.to_string()));
        self
    }

    pub fn slow(mut self, path: &str, delay: Duration, text: &str) -> Self {
        self.documents
            .insert(PathBuf::from(path), Scripted::Slow(delay, text.to_string()));
        self
    }
}

#[async_trait]
impl DocumentSource for ScriptedSource {
    async fn load(&self, path: &Path) -> SourceResult<String> {
        let read_error = |message: &str| SourceError::Read {
            path: path.display().to_string(),
            message: message.to_string(),
        };
        match self.documents.get(path) {
            Some(Scripted::Text(text)) => Ok(text.clone()),
            Some(Scripted::Fail(message)) => Err(read_error(message)),
            Some(Scripted::Slow(delay, text)) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
            None => Err(read_error("no such document")),
        }
    }
}

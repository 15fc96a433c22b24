use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding model unavailable: {0}")]
    Init(String),
    #[error("unknown embedding model: {0}")]
    UnknownModel(String),
    #[error("failed to generate embedding: {0}")]
    Generate(String),
    #[error("embedding has dimension {actual}, expected {expected}")]
    Dimension { expected: usize, actual: usize },
    #[error("embedding model lock poisoned")]
    Poisoned,
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Maps normalized text to a fixed-dimension vector.
///
/// Implementations are built once per process and shared behind `Arc`;
/// `embed` must be callable from several threads at once.
pub trait EmbeddingProvider: Send + Sync {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Length of every vector returned by [`EmbeddingProvider::embed`].
    fn dimension(&self) -> usize;
}

/// Options for the local sentence-transformer model.
#[derive(Clone, Debug)]
pub struct EmbedderSettings {
    pub model: String,
    pub cache_dir: Option<PathBuf>,
    pub show_download_progress: bool,
}

/// Resolve a configured model name to a fastembed model.
pub fn model_from_name(name: &str) -> EmbeddingResult<EmbeddingModel> {
    match name.to_ascii_lowercase().as_str() {
        "all-minilm-l6-v2" => Ok(EmbeddingModel::AllMiniLML6V2),
        "all-minilm-l12-v2" => Ok(EmbeddingModel::AllMiniLML12V2),
        "bge-small-en-v1.5" => Ok(EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" => Ok(EmbeddingModel::BGEBaseENV15),
        "multilingual-e5-large" => Ok(EmbeddingModel::MultilingualE5Large),
        _ => Err(EmbeddingError::UnknownModel(name.to_string())),
    }
}

/// Normalize a vector to unit length.
///
/// Returns the original vector when the norm is zero.
pub(crate) fn unit_length(vec: &[f32]) -> Vec<f32> {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        vec.to_vec()
    } else {
        vec.iter().map(|x| x / norm).collect()
    }
}

/// fastembed-backed provider.
///
/// The ONNX session needs exclusive access per call, so concurrent callers
/// are serialized by the inner mutex.
pub struct FastEmbedProvider {
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedProvider {
    /// Load the model and probe its output dimension.
    ///
    /// Any failure here means no candidate can be scored.
    pub fn try_new(settings: &EmbedderSettings) -> EmbeddingResult<Self> {
        let model = model_from_name(&settings.model)?;

        let mut options =
            InitOptions::new(model).with_show_download_progress(settings.show_download_progress);
        if let Some(cache_dir) = &settings.cache_dir {
            options = options.with_cache_dir(cache_dir.clone());
        }

        let mut embedder = TextEmbedding::try_new(options)
            .map_err(|error| EmbeddingError::Init(format!("{error:?}")))?;

        let dimension = embedder
            .embed(vec![""], None)
            .map_err(|error| EmbeddingError::Init(format!("probe failed: {error:?}")))?
            .into_iter()
            .next()
            .map(|probe| probe.len())
            .unwrap_or_default();
        if dimension == 0 {
            return Err(EmbeddingError::Init(format!(
                "model {} produced an empty embedding",
                settings.model
            )));
        }

        log::info!(
            "Loaded embedding model {} (dimension {dimension})",
            settings.model
        );

        Ok(Self {
            model: Mutex::new(embedder),
            model_name: settings.model.clone(),
            dimension,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl EmbeddingProvider for FastEmbedProvider {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let mut model = self.model.lock().map_err(|_| EmbeddingError::Poisoned)?;
        let embedding = model
            .embed(vec![text], None)
            .map_err(|error| EmbeddingError::Generate(format!("{error:?}")))?
            .into_iter()
            .next()
            .map(|value| unit_length(&value))
            .unwrap_or_default();
        drop(model);

        if embedding.len() != self.dimension {
            return Err(EmbeddingError::Dimension {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Memoizes embeddings by input text for the lifetime of the wrapper.
///
/// Identical documents in one batch are embedded once.
pub struct CachedEmbedder<P> {
    inner: P,
    cache: Mutex<HashMap<String, Vec<f32>>>,
}

impl<P: EmbeddingProvider> CachedEmbedder<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or_default()
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for CachedEmbedder<P> {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        {
            let cache = self.cache.lock().map_err(|_| EmbeddingError::Poisoned)?;
            if let Some(hit) = cache.get(text) {
                return Ok(hit.clone());
            }
        }

        // Computed outside the lock; a concurrent miss on the same text only
        // repeats deterministic work.
        let embedding = self.inner.embed(text)?;
        self.cache
            .lock()
            .map_err(|_| EmbeddingError::Poisoned)?
            .insert(text.to_string(), embedding.clone());
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }
}

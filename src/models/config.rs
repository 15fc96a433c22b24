//! Runtime settings loaded from `talentmatch.yaml` and the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::processing::embedding::EmbedderSettings;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared by the binary and the pipeline.
pub struct AppConfig {
    pub model: String,
    pub cache_dir: Option<PathBuf>,
    pub show_download_progress: bool,
    pub max_parallel: usize,
    pub secondary_timeout_secs: u64,
    pub output_path: PathBuf,
    /// Optional JSON rendering of the results, written next to the CSV.
    pub json_output_path: Option<PathBuf>,
}

impl AppConfig {
    /// Defaults, overridden by `talentmatch.yaml` in the working directory and
    /// then by `TALENTMATCH_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("talentmatch").required(false))
    }

    /// Same layering with an explicit settings file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("model", "all-minilm-l6-v2")?
            .set_default("show_download_progress", false)?
            .set_default("max_parallel", 4)?
            .set_default("secondary_timeout_secs", 120)?
            .set_default("output_path", crate::DEFAULT_RESULTS_FILE)?
            .add_source(file)
            .add_source(Environment::with_prefix("TALENTMATCH").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn embedder_settings(&self) -> EmbedderSettings {
        EmbedderSettings {
            model: self.model.clone(),
            cache_dir: self.cache_dir.clone(),
            show_download_progress: self.show_download_progress,
        }
    }

    pub fn secondary_timeout(&self) -> Duration {
        Duration::from_secs(self.secondary_timeout_secs)
    }
}

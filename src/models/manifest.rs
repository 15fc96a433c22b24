//! Batch manifest describing the reference document and candidate files.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File};
use serde::Deserialize;

/// Upper bound on candidate slots in a single batch.
pub const MAX_CANDIDATES: usize = 20;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CandidateEntry {
    pub name: Option<String>,
    pub resume: Option<PathBuf>,
    pub transcript: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BatchManifest {
    pub reference: PathBuf,
    #[serde(default)]
    pub include_secondary: bool,
    #[serde(default)]
    pub candidates: Vec<CandidateEntry>,
}

impl BatchManifest {
    /// Parse a YAML manifest and resolve its relative paths against the
    /// manifest's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let manifest: Self = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        manifest.validate()?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(manifest.resolve(base))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.candidates.len() > MAX_CANDIDATES {
            return Err(ConfigError::Message(format!(
                "manifest lists {} candidates, at most {MAX_CANDIDATES} are allowed",
                self.candidates.len()
            )));
        }
        Ok(())
    }

    fn resolve(mut self, base: &Path) -> Self {
        self.reference = base.join(&self.reference);
        for entry in &mut self.candidates {
            entry.resume = entry.resume.take().map(|path| base.join(path));
            entry.transcript = entry.transcript.take().map(|path| base.join(path));
        }
        self
    }

    /// Display name for the candidate at `index`, `Candidate #n` when unnamed.
    pub fn display_name(&self, index: usize) -> String {
        self.candidates
            .get(index)
            .and_then(|entry| entry.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Candidate #{}", index + 1))
    }
}

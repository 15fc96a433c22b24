use std::path::Path;

use thiserror::Error;

use crate::domain::result::ResultSet;

/// Fixed header row of the exported table.
pub const CSV_HEADER: &str = "Candidate,Match %,Status";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Render a score with exactly two decimals.
///
/// Rust formatting never consults the locale, so the separator is always `.`.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}

/// Batch mean formatted for display, `None` when nothing was scored.
pub fn format_mean(results: &ResultSet) -> Option<String> {
    results.mean().map(format_score)
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serialize ranked results as CSV, one row per candidate.
pub fn to_csv(results: &ResultSet) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + results.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for entry in results.entries() {
        out.push_str(&format!(
            "{},{},{}\n",
            escape_field(&entry.name),
            format_score(entry.score),
            entry.status
        ));
    }
    out
}

/// JSON rendering with the raw scores and the batch mean.
pub fn to_json(results: &ResultSet) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

fn write_file(path: &Path, contents: String) -> ExportResult<()> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Write the CSV artifact. An empty result set still gets the header row.
pub fn write_csv(results: &ResultSet, path: &Path) -> ExportResult<()> {
    write_file(path, to_csv(results))
}

pub fn write_json(results: &ResultSet, path: &Path) -> ExportResult<()> {
    write_file(path, to_json(results)?)
}

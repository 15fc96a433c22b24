pub mod domain;
pub mod models;
pub mod processing;
pub mod sources;

/// File name of the exported results when none is configured.
pub const DEFAULT_RESULTS_FILE: &str = "talentmatch_results.csv";

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use talentmatch::models::config::AppConfig;
use talentmatch::models::manifest::BatchManifest;
use talentmatch::processing::embedding::{CachedEmbedder, EmbeddingProvider, FastEmbedProvider};
use talentmatch::processing::export::{format_mean, format_score, write_csv, write_json};
use talentmatch::processing::pipeline::Pipeline;
use talentmatch::sources::assemble::assemble_candidates;
use talentmatch::sources::load_reference;
use talentmatch::sources::text_file::TextFileSource;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(manifest_path) = env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: talentmatch <manifest.yaml>");
        std::process::exit(2);
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let manifest = match BatchManifest::load(&manifest_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            log::error!("Failed to load manifest {}: {e}", manifest_path.display());
            std::process::exit(1);
        }
    };

    let source = TextFileSource;
    let reference = match load_reference(&source, &manifest.reference).await {
        Ok(text) => text,
        Err(e) => {
            log::error!("Failed to load job description: {e}");
            std::process::exit(1);
        }
    };

    let settings = config.embedder_settings();
    let provider = match tokio::task::spawn_blocking(move || FastEmbedProvider::try_new(&settings))
        .await
    {
        Ok(Ok(provider)) => provider,
        Ok(Err(e)) => {
            log::error!("Failed to initialize embedder: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("Embedder initialization task failed: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Using embedding model {}", provider.model_name());
    let provider = Arc::new(CachedEmbedder::new(provider));

    let batch = assemble_candidates(&manifest, &source, config.secondary_timeout()).await;
    let pipeline = Pipeline::new(
        Arc::clone(&provider) as Arc<dyn EmbeddingProvider>,
        config.max_parallel,
    );
    let report = match pipeline.run(&reference, batch.candidates).await {
        Ok(report) => report,
        Err(e) => {
            log::error!("Analysis aborted: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Embedded {} distinct documents, {} warnings",
        provider.cached_len(),
        batch.warnings.len() + report.warnings.len()
    );

    let results = &report.results;
    match format_mean(results) {
        Some(mean) => {
            println!("{:<32} {:>8}  Status", "Candidate", "Match %");
            for entry in results.entries() {
                println!(
                    "{:<32} {:>8}  {}",
                    entry.name,
                    format_score(entry.score),
                    entry.status
                );
            }
            println!("Average Score: {mean}%");
        }
        None => log::warn!("No valid resumes found."),
    }

    if let Err(e) = write_csv(results, &config.output_path) {
        log::error!("Failed to export results: {e}");
        std::process::exit(1);
    }
    log::info!("Results written to {}", config.output_path.display());

    if let Some(json_path) = &config.json_output_path {
        if let Err(e) = write_json(results, json_path) {
            log::error!("Failed to export JSON results: {e}");
            std::process::exit(1);
        }
        log::info!("JSON results written to {}", json_path.display());
    }
}

mod common;

use common::BagOfWordsEmbedder;
use talentmatch::domain::candidate::{CandidateInput, SecondaryError, Status, WarningKind};
use talentmatch::processing::export::to_csv;
use talentmatch::processing::pipeline::{Pipeline, PipelineError};

const JD: &str = "Senior Rust engineer: async Tokio, systems programming, Linux.";

fn pipeline(max_parallel: usize) -> Pipeline {
    Pipeline::new(BagOfWordsEmbedder::shared(), max_parallel)
}

fn names(report: &talentmatch::processing::pipeline::RunReport) -> Vec<String> {
    report
        .results
        .entries()
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}

#[tokio::test]
async fn ranks_candidates_by_similarity() {
    let candidates = vec![
        CandidateInput::new("Ana", "Python, Django and web design."),
        CandidateInput::new("Ben", "RUST engineer -- async tokio; systems programming on linux"),
        CandidateInput::new("Cai", "Rust systems work."),
    ];

    let report = pipeline(4).run(JD, candidates).await.expect("run should succeed");

    assert_eq!(names(&report), vec!["Ben", "Cai", "Ana"]);
    assert!(report.warnings.is_empty());
    let entries = report.results.entries();
    assert_eq!(entries[0].status, Status::Selected);
    assert_eq!(entries[2].status, Status::NotSelected);
    for entry in entries {
        assert!((0.0..=100.0).contains(&entry.score));
    }
}

#[tokio::test]
async fn failed_transcript_falls_back_to_primary_text() {
    let primary = "rust tokio systems";
    let baseline = pipeline(2)
        .run(JD, vec![CandidateInput::new("Dee", primary)])
        .await
        .expect("run should succeed");

    let degraded = pipeline(2)
        .run(
            JD,
            vec![
                CandidateInput::new("Dee", primary).with_secondary(Err(
                    SecondaryError::Unavailable("unsupported codec".to_string()),
                )),
            ],
        )
        .await
        .expect("run should succeed");

    assert_eq!(degraded.results.len(), 1);
    assert_eq!(
        degraded.results.entries()[0].score,
        baseline.results.entries()[0].score
    );
    assert_eq!(degraded.warnings.len(), 1);
    assert_eq!(degraded.warnings[0].candidate, "Dee");
    assert_eq!(degraded.warnings[0].kind, WarningKind::SecondarySourceFailed);
}

#[tokio::test]
async fn transcript_text_contributes_to_score() {
    let without = pipeline(2)
        .run(JD, vec![CandidateInput::new("Eve", "python")])
        .await
        .expect("run should succeed");
    let with = pipeline(2)
        .run(
            JD,
            vec![
                CandidateInput::new("Eve", "python")
                    .with_secondary(Ok("I build async rust services on linux".to_string())),
            ],
        )
        .await
        .expect("run should succeed");

    assert!(with.results.entries()[0].score > without.results.entries()[0].score);
    assert!(with.warnings.is_empty());
}

#[tokio::test]
async fn no_primary_documents_reports_no_valid_candidates() {
    let candidates = vec![
        CandidateInput::absent("Candidate #1"),
        CandidateInput::absent("Candidate #2"),
    ];

    let report = pipeline(4).run(JD, candidates).await.expect("run should succeed");

    assert!(report.results.is_empty());
    assert!(!report.results.has_valid_candidates());
    assert_eq!(report.results.mean(), None);
    assert!(report.warnings.is_empty());
    assert_eq!(to_csv(&report.results), "Candidate,Match %,Status\n");
}

#[tokio::test]
async fn absent_primary_is_skipped_silently() {
    let candidates = vec![
        CandidateInput::new("Ana", "rust"),
        CandidateInput::absent("Ghost"),
        CandidateInput::new("Cai", "linux"),
    ];

    let report = pipeline(4).run(JD, candidates).await.expect("run should succeed");

    assert_eq!(report.results.len(), 2);
    assert!(!names(&report).contains(&"Ghost".to_string()));
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn empty_reference_aborts_before_scoring() {
    let result = pipeline(4)
        .run("  \n", vec![CandidateInput::new("Ana", "rust")])
        .await;

    assert!(matches!(result, Err(PipelineError::EmptyReference)));
}

#[tokio::test]
async fn degenerate_embedding_excludes_candidate_with_warning() {
    let candidates = vec![
        CandidateInput::new("Ana", "rust tokio"),
        CandidateInput::new("Bad", "degenerate"),
        CandidateInput::new("Cai", "python"),
    ];

    let report = pipeline(4).run(JD, candidates).await.expect("run should succeed");

    assert_eq!(names(&report), vec!["Ana", "Cai"]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].candidate, "Bad");
    assert_eq!(report.warnings[0].kind, WarningKind::ScoreComputation);

    let entries = report.results.entries();
    let expected_mean = (entries[0].score + entries[1].score) / 2.0;
    let mean = report.results.mean().expect("mean should be present");
    assert!((mean - expected_mean).abs() < 1e-9);
}

#[tokio::test]
async fn identical_documents_keep_upload_order() {
    let candidates = vec![
        CandidateInput::new("First", "rust linux"),
        CandidateInput::new("Second", "rust linux"),
        CandidateInput::new("Third", "rust linux"),
    ];

    let report = pipeline(8).run(JD, candidates).await.expect("run should succeed");

    assert_eq!(names(&report), vec!["First", "Second", "Third"]);
    assert!(
        report
            .results
            .entries()
            .iter()
            .all(|entry| entry.status == Status::Selected)
    );
}

#[tokio::test]
async fn output_does_not_depend_on_parallelism() {
    let candidates: Vec<CandidateInput> = (0..12)
        .map(|i| {
            let text = match i % 3 {
                0 => "rust tokio linux",
                1 => "systems programming",
                _ => "java spring",
            };
            CandidateInput::new(format!("Candidate #{}", i + 1), text)
        })
        .collect();

    let serial = pipeline(1)
        .run(JD, candidates.clone())
        .await
        .expect("run should succeed");
    let parallel = pipeline(8)
        .run(JD, candidates)
        .await
        .expect("run should succeed");

    assert_eq!(serial.results, parallel.results);
    assert_eq!(to_csv(&serial.results), to_csv(&parallel.results));
}

#[tokio::test]
async fn empty_primary_text_is_still_scored() {
    let report = pipeline(1)
        .run(JD, vec![CandidateInput::new("Blank", "")])
        .await
        .expect("run should succeed");

    assert_eq!(report.results.len(), 1);
    assert!(report.warnings.is_empty());
}

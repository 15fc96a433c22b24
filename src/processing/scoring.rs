use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("vector dimensions differ: {0} vs {1}")]
    DimensionMismatch(usize, usize),
    #[error("vector has zero magnitude")]
    ZeroMagnitude,
    #[error("similarity is not a finite number")]
    NotFinite,
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Cosine similarity between two embeddings scaled to `[0, 100]`.
///
/// Accumulates in `f64`. Anti-correlated vectors clamp to 0 and rounding
/// overshoot clamps to 100.
pub fn score(reference: &[f32], candidate: &[f32]) -> ScoreResult<f64> {
    if reference.len() != candidate.len() {
        return Err(ScoreError::DimensionMismatch(
            reference.len(),
            candidate.len(),
        ));
    }

    let (dot, ref_norm, cand_norm) = reference.iter().zip(candidate).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, a, b), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, a + x * x, b + y * y)
        },
    );

    if ref_norm == 0.0 || cand_norm == 0.0 {
        return Err(ScoreError::ZeroMagnitude);
    }

    let cosine = dot / (ref_norm.sqrt() * cand_norm.sqrt());
    if !cosine.is_finite() {
        return Err(ScoreError::NotFinite);
    }

    Ok((cosine * 100.0).clamp(0.0, 100.0))
}

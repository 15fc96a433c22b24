use crate::domain::candidate::{SecondaryError, SecondaryResult};

/// Merge a candidate's primary text with its optional transcript.
///
/// A missing or failed transcript leaves the primary text untouched; the
/// failure is handed back so the caller can attribute a warning to the
/// candidate.
pub fn combine(
    primary: &str,
    secondary: Option<&SecondaryResult>,
) -> (String, Option<SecondaryError>) {
    match secondary {
        None => (primary.to_string(), None),
        Some(Ok(text)) => (format!("{primary} {text}"), None),
        Some(Err(error)) => (primary.to_string(), Some(error.clone())),
    }
}

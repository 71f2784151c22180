//! Local pre-submit checks for task text.
//!
//! A failed check short-circuits the action creator: no intent is produced
//! and nothing is dispatched.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[allow(clippy::expect_used)] // literal pattern
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").expect("tag pattern is valid"));

/// Text was empty once markup and surrounding whitespace were removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please enter a valid description")]
pub struct ValidationError;

/// Strip HTML tags and trim
#[must_use]
pub fn sanitize(text: &str) -> String {
    TAG.replace_all(text, "").trim().to_owned()
}

/// Sanitize `text`, failing when nothing is left
///
/// # Errors
///
/// Returns [`ValidationError`] for blank or markup-only input.
pub fn validate(text: &str) -> Result<String, ValidationError> {
    let clean = sanitize(text);
    if clean.is_empty() {
        return Err(ValidationError);
    }
    Ok(clean)
}

//! Candidate surname extraction

use regex::Regex;
use std::sync::LazyLock;

use crate::{Error, Result};

// The label may be wrapped in markdown emphasis, e.g. `**Surname:** Smith`
static SURNAME_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bSurname\b[:\s*]*([A-Za-z]+(?:['-][A-Za-z]+)*)").unwrap()
});

/// Find the candidate's surname from its labelled field.
///
/// ```text
/// **Surname:** Smith      -> "Smith"
/// Surname         Smith   -> "Smith"
/// ```
pub fn find_candidate_surname(text: &str) -> Result<String> {
    SURNAME_FIELD
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(Error::SurnameNotFound)
}

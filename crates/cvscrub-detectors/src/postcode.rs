use cvscrub_core::{Category, Span};
use regex::Regex;
use std::sync::LazyLock;

use crate::Detector;

// Outward code (A9, A99, AA9, AA99, A9A, AA9A) then inward code (9AA)
static UK_POSTCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{1,2}\d[A-Z\d]?[ \t]*\d[A-Z]{2}\b").unwrap());

/// UK postcodes
pub struct PostcodeDetector;

impl Detector for PostcodeDetector {
    fn name(&self) -> &str {
        "postcode"
    }

    fn categories(&self) -> &[Category] {
        &[Category::Postcode]
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        UK_POSTCODE
            .find_iter(text)
            .map(|m| Span::from_match(Category::Postcode, m))
            .collect()
    }
}

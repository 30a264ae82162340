use cvscrub_core::{Category, Span};
use regex::Regex;
use std::sync::LazyLock;

use crate::Detector;

// +44 7478 121959, +44 (0)20 7946 0958, (07478) 121959, 07478 121959, 020 7946 0958
static UK_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+44\s?(?:\(0\)\s?)?\d{2,4}|\(?0\d{2,4}\)?)\s?\d{3,4}\s?\d{3,4}").unwrap()
});

/// UK-style phone numbers
pub struct PhoneDetector;

impl Detector for PhoneDetector {
    fn name(&self) -> &str {
        "phone_number"
    }

    fn categories(&self) -> &[Category] {
        &[Category::Phone]
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        UK_PHONE
            .find_iter(text)
            .map(|m| Span::from_match(Category::Phone, m))
            .collect()
    }
}

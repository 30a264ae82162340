use cvscrub_core::{Category, Error, Result, Span};
use regex::{Regex, RegexBuilder};

use crate::Detector;

/// Every case-insensitive occurrence of the candidate surname, including
/// inside longer tokens such as `jsmith@example.com`
pub struct SurnameDetector {
    pattern: Option<Regex>,
}

impl SurnameDetector {
    pub fn new(surname: &str) -> Result<Self> {
        let surname = surname.trim();
        if surname.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = RegexBuilder::new(&regex::escape(surname))
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                name: "surname".to_string(),
                source,
            })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }
}

impl Detector for SurnameDetector {
    fn name(&self) -> &str {
        "surname"
    }

    fn categories(&self) -> &[Category] {
        &[Category::Surname]
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        pattern
            .find_iter(text)
            .map(|m| Span::from_match(Category::Surname, m))
            .collect()
    }
}

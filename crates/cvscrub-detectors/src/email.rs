use cvscrub_core::{Category, Span};
use regex::Regex;
use std::sync::LazyLock;

use crate::Detector;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

pub struct EmailDetector;

impl Detector for EmailDetector {
    fn name(&self) -> &str {
        "email"
    }

    fn categories(&self) -> &[Category] {
        &[Category::Email]
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        EMAIL
            .find_iter(text)
            .map(|m| Span::from_match(Category::Email, m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(text: &str) -> Vec<String> {
        EmailDetector
            .detect(text)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_addresses() {
        assert_eq!(
            found("Email: jessica.o@gmail.com"),
            vec!["jessica.o@gmail.com"]
        );
        assert_eq!(
            found("j_smith+cv@mail.example.co.uk, or call"),
            vec!["j_smith+cv@mail.example.co.uk"]
        );
    }

    #[test]
    fn test_trailing_full_stop() {
        assert_eq!(found("Write to jo@acme.io."), vec!["jo@acme.io"]);
    }

    #[test]
    fn test_not_an_address() {
        assert!(found("Rated 5@home, see @handle").is_empty());
    }
}

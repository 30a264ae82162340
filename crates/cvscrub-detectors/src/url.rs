use cvscrub_core::{Category, Span};
use regex::Regex;
use std::sync::LazyLock;

use crate::Detector;

/// Scheme or `www.` URLs, and bare profile links on hosts common in CVs
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:\b(?:https?|ftp)://|\bwww\.)[^\s<>"]+|\b(?:[a-z]{2,3}\.)?(?:linkedin|github|gitlab|twitter|x|facebook|instagram|medium|behance|dribbble|stackoverflow)\.(?:com|net|io)/[^\s<>"]*"#,
    )
    .unwrap()
});

// Sentence punctuation after a link is not part of it
const TRAILING: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '\''];

pub struct UrlDetector;

impl Detector for UrlDetector {
    fn name(&self) -> &str {
        "url"
    }

    fn categories(&self) -> &[Category] {
        &[Category::Url]
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        URL.find_iter(text)
            .filter_map(|m| {
                let url = m.as_str().trim_end_matches(TRAILING);
                (!url.is_empty()).then(|| {
                    Span::new(Category::Url, m.start(), m.start() + url.len(), url)
                })
            })
            .collect()
    }
}

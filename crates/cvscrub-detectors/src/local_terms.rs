use cvscrub_core::{Category, Error, Result, Span};
use regex::{Regex, RegexBuilder};

use crate::Detector;

/// Operator-supplied terms (street names, employers, villages...) that the
/// other detectors would miss.
pub struct LocalTermsDetector {
    pattern: Option<Regex>,
}

impl LocalTermsDetector {
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = whole_word_matcher(terms, "local_terms")?;
        Ok(Self { pattern })
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }
}

impl Detector for LocalTermsDetector {
    fn name(&self) -> &str {
        "local_terms"
    }

    fn categories(&self) -> &[Category] {
        &[Category::LocalTerm]
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        pattern
            .find_iter(text)
            .map(|m| Span::from_match(Category::LocalTerm, m))
            .collect()
    }
}

/// Build a case-insensitive alternation that only matches whole words.
///
/// Terms are escaped and tried longest first. A word boundary is only
/// required on an edge that is itself a word character, so `St. Mary's`
/// or `C++` still match. Returns `None` when no usable term is given.
fn whole_word_matcher<I, S>(terms: I, name: &str) -> Result<Option<Regex>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut terms: Vec<String> = terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        return Ok(None);
    }

    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();

    let alternation = terms
        .iter()
        .map(|term| {
            let starts_word = term.chars().next().is_some_and(is_word_char);
            let ends_word = term.chars().last().is_some_and(is_word_char);
            format!(
                "{}{}{}",
                if starts_word { r"\b" } else { "" },
                regex::escape(term),
                if ends_word { r"\b" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .map(Some)
        .map_err(|source| Error::InvalidPattern {
            name: name.to_string(),
            source,
        })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

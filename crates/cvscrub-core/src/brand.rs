//! Brand-name guard
//!
//! Vendor and product names look like organisation or person names to the
//! detectors. The guard swaps them for opaque sentinels before scrubbing and
//! swaps them back afterwards.

use regex::{Regex, RegexBuilder};

use crate::{Error, Result, Span};

const SENTINEL_OPEN: char = '⟦';
const SENTINEL_CLOSE: char = '⟧';

/// Vendor and technology names kept verbatim in scrubbed output
pub const DEFAULT_BRANDS: &[&str] = &[
    "Amazon Web Services",
    "AWS",
    "Microsoft",
    "Azure",
    "Google Cloud",
    "Google",
    "Salesforce",
    "Oracle",
    "Cisco",
    "IBM",
    "Adobe",
    "Atlassian",
    "Jira",
    "Confluence",
    "GitHub",
    "GitLab",
    "Docker",
    "Kubernetes",
    "Terraform",
    "Jenkins",
    "Python",
    "JavaScript",
    "TypeScript",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Excel",
    "PowerPoint",
    "SharePoint",
    "Tableau",
    "ServiceNow",
    "Workday",
    "HubSpot",
    "Slack",
    "Zendesk",
];

pub struct BrandGuard {
    matcher: Option<Regex>,
}

impl BrandGuard {
    /// Build a guard over the given terms. Blank terms are ignored.
    pub fn new<I, S>(terms: I) -> Result<Self>
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
            return Ok(Self { matcher: None });
        }

        // Leftmost-first alternation: longer terms must come first
        terms.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        });
        terms.dedup_by(|a, b| a.eq_ignore_ascii_case(b));

        let alternation = terms
            .iter()
            .map(|t| whole_word(t))
            .collect::<Vec<_>>()
            .join("|");

        let matcher = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidPattern {
                name: "brands".to_string(),
                source,
            })?;

        Ok(Self {
            matcher: Some(matcher),
        })
    }

    /// Replace every brand occurrence with a unique sentinel
    pub fn protect(&self, text: &str) -> Protected {
        self.protect_outside(text, &[])
    }

    /// Like [`protect`](Self::protect), but occurrences overlapping any of
    /// `keep` are left in place
    pub fn protect_outside(&self, text: &str, keep: &[Span]) -> Protected {
        let (open, close) = unique_marks(text);
        let mut originals = Vec::new();

        let Some(matcher) = &self.matcher else {
            return Protected {
                text: text.to_string(),
                open,
                close,
                originals,
            };
        };

        let mut protected = String::with_capacity(text.len());
        let mut cursor = 0;

        for m in matcher.find_iter(text) {
            if keep.iter().any(|k| k.start < m.end() && m.start() < k.end) {
                continue;
            }
            protected.push_str(&text[cursor..m.start()]);
            protected.push_str(&sentinel(&open, &close, originals.len()));
            originals.push(m.as_str().to_string());
            cursor = m.end();
        }
        protected.push_str(&text[cursor..]);

        tracing::debug!(count = originals.len(), "protected brand names");

        Protected {
            text: protected,
            open,
            close,
            originals,
        }
    }
}

// `\b` only where the term starts or ends with a word character
fn whole_word(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let start = if term.starts_with(is_word) { r"\b" } else { "" };
    let end = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", start, regex::escape(term), end)
}

/// Text with brand names swapped out, plus what is needed to put them back
#[derive(Debug, Clone)]
pub struct Protected {
    pub text: String,
    open: String,
    close: String,
    originals: Vec<String>,
}

impl Protected {
    /// Number of protected occurrences
    pub fn count(&self) -> usize {
        self.originals.len()
    }

    /// Put the original brand text back wherever a sentinel survives
    pub fn restore(&self, text: &str) -> String {
        if self.originals.is_empty() || !text.contains(&self.open) {
            return text.to_string();
        }

        let mut restored = text.to_string();
        for (index, original) in self.originals.iter().enumerate() {
            restored = restored.replace(&sentinel(&self.open, &self.close, index), original);
        }
        restored
    }
}

fn sentinel(open: &str, close: &str, index: usize) -> String {
    format!("{}{}{}", open, index, close)
}

// Sentinels carry no letters, so no name or surname pattern can reach into
// them. The marks are doubled until they do not occur in the input.
fn unique_marks(text: &str) -> (String, String) {
    let mut open = SENTINEL_OPEN.to_string();
    let mut close = SENTINEL_CLOSE.to_string();
    while text.contains(&open) {
        open.push(SENTINEL_OPEN);
        close.push(SENTINEL_CLOSE);
    }
    (open, close)
}

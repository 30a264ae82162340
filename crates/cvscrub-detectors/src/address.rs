use cvscrub_core::{Category, Error, Result, Span};
use regex::Regex;

use crate::Detector;

/// Common UK street types
pub const DEFAULT_STREET_TYPES: &[&str] = &[
    "Street", "St", "Road", "Rd", "Avenue", "Ave", "Lane", "Ln", "Drive", "Dr", "Close", "Court",
    "Ct", "Terrace", "Place", "Gardens", "Way", "Crescent", "Square", "Row", "Park", "View", "Walk",
];

/// Street addresses that end in a known street type.
///
/// Matches stay on one line: an optional house number (`12`, `12a`, `12,`)
/// followed by one to four capitalised words and the street type.
pub struct AddressDetector {
    pattern: Regex,
}

impl AddressDetector {
    pub fn new<I, S>(street_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut types: Vec<String> = street_types
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        types.sort_by(|a, b| b.len().cmp(&a.len()));

        if types.is_empty() {
            return Err(Error::InvalidConfig(
                "no street types configured for address detection".to_string(),
            ));
        }

        let alternation = types
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(
            r"\b(?:\d+[A-Za-z]?,?[ \t]+)?(?:[A-Z][A-Za-z'.-]*[ \t]+){{1,4}}(?:{})\b\.?",
            alternation
        ))
        .map_err(|source| Error::InvalidPattern {
            name: "address".to_string(),
            source,
        })?;

        Ok(Self { pattern })
    }
}

impl Default for AddressDetector {
    fn default() -> Self {
        Self::new(DEFAULT_STREET_TYPES).expect("built-in street types form a valid pattern")
    }
}

impl Detector for AddressDetector {
    fn name(&self) -> &str {
        "address"
    }

    fn categories(&self) -> &[Category] {
        &[Category::Address]
    }

    fn detect(&self, text: &str) -> Vec<Span> {
        self.pattern
            .find_iter(text)
            .map(|m| Span::from_match(Category::Address, m))
            .collect()
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of PII a span was flagged as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Email,
    Url,
    Surname,
    LocalTerm,
    Phone,
    Postcode,
    Address,
    Name,
    Organization,
    Location,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Email,
        Category::Url,
        Category::Surname,
        Category::LocalTerm,
        Category::Phone,
        Category::Postcode,
        Category::Address,
        Category::Name,
        Category::Organization,
        Category::Location,
    ];

    /// Upper-case stem used when building placeholder labels
    pub fn stem(self) -> &'static str {
        match self {
            Category::Email => "EMAIL",
            Category::Url => "URL",
            Category::Surname => "SURNAME",
            Category::LocalTerm => "LOCAL",
            Category::Phone => "PHONE",
            Category::Postcode => "POSTCODE",
            Category::Address => "ADDRESS",
            Category::Name => "NAME",
            Category::Organization => "ORGANIZATION",
            Category::Location => "LOCATION",
        }
    }

    /// Lower value wins when overlapping spans are merged
    pub fn priority(self) -> u8 {
        match self {
            Category::Email => 0,
            Category::Url => 1,
            Category::Surname => 2,
            Category::LocalTerm => 3,
            Category::Phone => 4,
            Category::Postcode => 5,
            Category::Address => 6,
            Category::Name => 7,
            Category::Organization => 8,
            Category::Location => 9,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// A detected piece of PII, as byte offsets into the scanned text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub category: Category,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Span {
    pub fn new(category: Category, start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            category,
            start,
            end,
            text: text.into(),
        }
    }

    /// Build a span from a regex match
    pub fn from_match(category: Category, m: regex::Match<'_>) -> Self {
        Self::new(category, m.start(), m.end(), m.as_str())
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_follows_declaration_order() {
        let priorities: Vec<u8> = Category::ALL.iter().map(|c| c.priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_overlap() {
        let a = Span::new(Category::Name, 0, 5, "Alice");
        let b = Span::new(Category::Surname, 4, 9, "eSmit");
        let c = Span::new(Category::Phone, 5, 8, "123");

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_category_serde_name() {
        let json = serde_json::to_string(&Category::LocalTerm).unwrap();
        assert_eq!(json, "\"local_term\"");
        assert_eq!(Category::LocalTerm.to_string(), "LOCAL");
    }
}

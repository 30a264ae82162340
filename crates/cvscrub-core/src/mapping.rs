//! Placeholder → original bookkeeping

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use time::OffsetDateTime;

use crate::{Error, Result};

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{[A-Z]+-[0-9a-f]+\}\}").unwrap());

/// Reversible record of every substitution made in one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    #[serde(default)]
    pub source: Option<String>,

    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,

    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
}

impl Mapping {
    pub fn new(source: Option<String>) -> Self {
        Self {
            source,
            generated_at: OffsetDateTime::now_utc(),
            replacements: BTreeMap::new(),
        }
    }

    /// Record a label. A label may only ever stand for one original.
    pub fn insert(&mut self, label: &str, original: &str) -> Result<()> {
        match self.replacements.get(label) {
            Some(existing) if existing != original => Err(Error::InvalidMapping(format!(
                "label {} already maps to different text",
                label
            ))),
            Some(_) => Ok(()),
            None => {
                self.replacements
                    .insert(label.to_string(), original.to_string());
                Ok(())
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.replacements.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.replacements
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rewrite every original through `f`, keeping labels
    pub fn map_originals(&mut self, f: impl Fn(&str) -> String) {
        for original in self.replacements.values_mut() {
            *original = f(original);
        }
    }

    /// Put originals back in place of the labels found in `scrubbed`.
    ///
    /// Labels missing from the mapping are left untouched.
    pub fn restore(&self, scrubbed: &str) -> String {
        LABEL
            .replace_all(scrubbed, |caps: &regex::Captures<'_>| {
                let label = &caps[0];
                self.get(label).unwrap_or(label).to_string()
            })
            .into_owned()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mapping {
        let mut mapping = Mapping::new(None);
        mapping.insert("{{NAME-a1b2c3d4e5}}", "John").unwrap();
        mapping.insert("{{PHONE-0f0f0f0f0f}}", "07478 121959").unwrap();
        mapping
    }

    #[test]
    fn test_restore() {
        let mapping = sample();
        let scrubbed = "Call {{NAME-a1b2c3d4e5}} on {{PHONE-0f0f0f0f0f}}.";

        assert_eq!(mapping.restore(scrubbed), "Call John on 07478 121959.");
    }

    #[test]
    fn test_restore_leaves_unknown_labels() {
        let mapping = sample();
        let scrubbed = "{{NAME-ffffffffff}} met {{NAME-a1b2c3d4e5}}";

        assert_eq!(mapping.restore(scrubbed), "{{NAME-ffffffffff}} met John");
    }

    #[test]
    fn test_insert_rejects_conflicting_original() {
        let mut mapping = sample();

        assert!(mapping.insert("{{NAME-a1b2c3d4e5}}", "John").is_ok());
        let err = mapping.insert("{{NAME-a1b2c3d4e5}}", "Jane").unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(_)));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut mapping = sample();
        mapping.source = Some("cv.txt".to_string());
        let json = mapping.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"], "cv.txt");
        assert_eq!(value["replacements"]["{{NAME-a1b2c3d4e5}}"], "John");
        assert!(value["generated_at"].is_string());

        let parsed = Mapping::from_json(&json).unwrap();
        assert_eq!(parsed.replacements, mapping.replacements);
    }

    #[test]
    fn test_map_originals() {
        let mut mapping = sample();
        mapping.map_originals(|s| s.to_uppercase());

        assert_eq!(mapping.get("{{NAME-a1b2c3d4e5}}"), Some("JOHN"));
    }
}

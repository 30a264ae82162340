//! Span merging and substitution

use cvscrub_core::{Error, Mapping, Result, Span};
use cvscrub_detectors::DetectorSet;

use crate::labeler::{DEFAULT_WIDTH, Labeler, MAX_WIDTH};

/// Output of one scrub
#[derive(Debug, Clone)]
pub struct Scrubbed {
    pub text: String,
    /// Present when the scrubber was asked to record replacements
    pub mapping: Option<Mapping>,
    /// Number of spans replaced
    pub replaced: usize,
}

/// Runs a detector set over text and swaps every span for its label
pub struct Scrubber {
    detectors: DetectorSet,
    labeler: Labeler,
    record_mapping: bool,
}

impl Scrubber {
    pub fn new(detectors: DetectorSet, labeler: Labeler) -> Self {
        Self {
            detectors,
            labeler,
            record_mapping: false,
        }
    }

    pub fn with_mapping(mut self, record: bool) -> Self {
        self.record_mapping = record;
        self
    }

    pub fn scrub(&self, text: &str, source: Option<&str>) -> Result<Scrubbed> {
        let spans = merge_spans(text, self.detectors.detect_all(text));

        // Always kept for collision checks, only returned on request
        let mut mapping = Mapping::new(source.map(String::from));
        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;

        for span in &spans {
            output.push_str(&text[cursor..span.start]);
            output.push_str(&self.assign_label(span, &mut mapping)?);
            cursor = span.end;
        }
        output.push_str(&text[cursor..]);

        tracing::debug!(
            replaced = spans.len(),
            distinct = mapping.len(),
            "scrubbed text"
        );

        Ok(Scrubbed {
            text: output,
            mapping: self.record_mapping.then_some(mapping),
            replaced: spans.len(),
        })
    }

    // Widen the hash until the label is free or already stands for this text
    fn assign_label(&self, span: &Span, mapping: &mut Mapping) -> Result<String> {
        let mut width = DEFAULT_WIDTH;

        loop {
            let label = self.labeler.label(span.category, &span.text, width);
            match mapping.get(&label) {
                None => {
                    mapping.insert(&label, &span.text)?;
                    return Ok(label);
                }
                Some(existing) if existing == span.text => return Ok(label),
                Some(_) if width < MAX_WIDTH => {
                    tracing::debug!(%label, "label collision, widening hash");
                    width = (width + 2).min(MAX_WIDTH);
                }
                Some(_) => {
                    return Err(Error::InvalidMapping(format!(
                        "unresolvable label collision for {}",
                        label
                    )));
                }
            }
        }
    }
}

/// Sort spans and merge overlapping ones.
///
/// A merged span covers the union of its parts and takes the category with
/// the highest priority among them. Spans that do not fit `text` are dropped.
pub fn merge_spans(text: &str, mut spans: Vec<Span>) -> Vec<Span> {
    spans.retain(|s| {
        let valid = s.start < s.end
            && s.end <= text.len()
            && text.is_char_boundary(s.start)
            && text.is_char_boundary(s.end);
        if !valid {
            tracing::warn!(start = s.start, end = s.end, "dropping out-of-range span");
        }
        valid
    });

    spans.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.category.priority().cmp(&b.category.priority()))
            .then_with(|| b.end.cmp(&a.end))
    });

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if last.overlaps(&span) => {
                if span.end > last.end {
                    last.end = span.end;
                    last.text = text[last.start..last.end].to_string();
                }
                if span.category.priority() < last.category.priority() {
                    last.category = span.category;
                }
            }
            _ => merged.push(span),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvscrub_core::Category;
    use cvscrub_detectors::{LocalTermsDetector, PhoneDetector};

    fn span(category: Category, text: &str, needle: &str) -> Span {
        let start = text.find(needle).unwrap();
        Span::new(category, start, start + needle.len(), needle)
    }

    #[test]
    fn test_merge_overlapping_takes_union_and_priority() {
        let text = "Lives at 12 Baker Street London";
        let spans = vec![
            span(Category::Location, text, "Baker Street London"),
            span(Category::Address, text, "12 Baker Street"),
        ];

        let merged = merge_spans(text, spans);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "12 Baker Street London");
        assert_eq!(merged[0].category, Category::Address);
    }

    #[test]
    fn test_adjacent_spans_stay_separate() {
        let text = "AB";
        let spans = vec![
            Span::new(Category::Name, 0, 1, "A"),
            Span::new(Category::Name, 1, 2, "B"),
        ];

        assert_eq!(merge_spans(text, spans).len(), 2);
    }

    #[test]
    fn test_contained_span_absorbed() {
        let text = "Call John Smith now";
        let spans = vec![
            span(Category::Name, text, "John Smith"),
            span(Category::Surname, text, "Smith"),
        ];

        let merged = merge_spans(text, spans);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "John Smith");
        assert_eq!(merged[0].category, Category::Surname);
    }

    #[test]
    fn test_invalid_spans_dropped() {
        let text = "héllo";
        let spans = vec![
            Span::new(Category::Name, 2, 3, "?"),
            Span::new(Category::Name, 3, 99, "?"),
            Span::new(Category::Name, 0, 1, "h"),
        ];

        let merged = merge_spans(text, spans);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "h");
    }

    #[test]
    fn test_scrub_replaces_and_records() {
        let detectors = DetectorSet::new().with(PhoneDetector);
        let scrubber = Scrubber::new(detectors, Labeler::new("pepper")).with_mapping(true);

        let scrubbed = scrubber
            .scrub("Call 07478 121959 or 07478 121959", Some("cv.txt"))
            .unwrap();
        let mapping = scrubbed.mapping.unwrap();

        assert_eq!(scrubbed.replaced, 2);
        assert_eq!(mapping.len(), 1);
        assert!(!scrubbed.text.contains("07478"));
        assert_eq!(mapping.source.as_deref(), Some("cv.txt"));
        assert_eq!(
            mapping.restore(&scrubbed.text),
            "Call 07478 121959 or 07478 121959"
        );
    }

    #[test]
    fn test_scrub_without_mapping() {
        let detectors = DetectorSet::new().with(LocalTermsDetector::new(["Ely"]).unwrap());
        let scrubber = Scrubber::new(detectors, Labeler::new("pepper"));

        let scrubbed = scrubber.scrub("Born in Ely", None).unwrap();
        assert!(scrubbed.mapping.is_none());
        assert!(scrubbed.text.starts_with("Born in {{LOCAL-"));
    }

    #[test]
    fn test_collision_widens_label() {
        let labeler = Labeler::new("pepper");
        let scrubber = Scrubber::new(DetectorSet::new(), labeler.clone());
        let span = Span::new(Category::Name, 0, 4, "John");

        // Pretend the short label is already taken by other text
        let mut mapping = Mapping::new(None);
        let short = labeler.label(Category::Name, "John", DEFAULT_WIDTH);
        mapping.insert(&short, "Jane").unwrap();

        let label = scrubber.assign_label(&span, &mut mapping).unwrap();
        assert_ne!(label, short);
        assert_eq!(label, labeler.label(Category::Name, "John", DEFAULT_WIDTH + 2));
        assert_eq!(mapping.get(&label), Some("John"));
    }
}

//! Detector trait and the ordered detector set

use cvscrub_core::{Category, Span};
use std::sync::Arc;

/// Trait for scanning text for one family of PII
pub trait Detector: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Categories this detector can emit
    fn categories(&self) -> &[Category];

    /// Scan `text` and return every span found, in any order
    fn detect(&self, text: &str) -> Vec<Span>;
}

/// Ordered collection of detectors
#[derive(Clone, Default)]
pub struct DetectorSet {
    detectors: Vec<Arc<dyn Detector>>,
}

impl DetectorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, detector: Arc<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn with(mut self, detector: impl Detector + 'static) -> Self {
        self.register(Arc::new(detector));
        self
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run every detector and collect all spans
    pub fn detect_all(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        for detector in &self.detectors {
            let found = detector.detect(text);
            tracing::debug!(detector = detector.name(), count = found.len(), "detector finished");
            spans.extend(found);
        }

        spans
    }
}

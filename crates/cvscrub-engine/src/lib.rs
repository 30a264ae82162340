//! Redaction engine: merges detector spans, assigns labels, drives the
//! full document pipeline.

pub mod labeler;
pub mod pipeline;
pub mod scrubber;

pub use labeler::Labeler;
pub use pipeline::Pipeline;
pub use scrubber::{Scrubbed, Scrubber, merge_spans};

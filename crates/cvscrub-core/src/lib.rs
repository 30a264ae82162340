//! Core domain types for cvscrub
//!
//! This crate contains:
//! - PII categories and detected spans
//! - Candidate surname extraction
//! - The brand-name guard
//! - The reversible replacement mapping

pub mod brand;
pub mod error;
pub mod mapping;
pub mod span;
pub mod surname;

pub use brand::{BrandGuard, DEFAULT_BRANDS, Protected};
pub use error::{Error, Result};
pub use mapping::Mapping;
pub use span::{Category, Span};
pub use surname::find_candidate_surname;

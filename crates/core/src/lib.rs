//! Core domain types, line normalization, and progressive-reveal
//! redundancy detection for slide decks and PDFs.

pub mod detect;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod types;

pub use detect::{detect_redundant_units, DetectorConfig};
pub use error::{Error, Result};
pub use matcher::{is_fuzzy_subset, line_is_contained, similarity_ratio};
pub use normalize::LineNormalizer;
pub use types::{Document, DocumentFormat, RedundancyDecision, Unit};

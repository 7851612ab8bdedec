//! PDF backend for deck slimming.
//!
//! Reads per-page text through the PDF text layer and rebuilds a
//! slimmed copy by deleting redundant pages in place.

pub mod reader;
pub mod writer;

pub use reader::PdfReader;
pub use writer::PdfReconstructor;

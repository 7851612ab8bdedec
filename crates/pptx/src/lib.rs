//! PPTX (Office Open XML) backend for deck slimming.
//!
//! A .pptx file is a ZIP archive of XML parts. The reader extracts
//! per-slide text from the slide parts; the reconstructor drops
//! redundant slides by rewriting the presentation part and its
//! relationships, leaving every other archive entry untouched.

pub mod reader;
pub mod rels;
pub mod writer;

pub use reader::PptxReader;
pub use writer::PptxReconstructor;

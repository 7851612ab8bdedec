//! PDF page text extraction.

use deckslim_core::{Error, Result};
use lopdf::Document;
use std::path::Path;

/// Reader supplying raw per-page text from a PDF file.
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Extract raw text for every page, in page order.
    ///
    /// Pages whose text layer cannot be decoded yield an empty string
    /// rather than failing the document; an empty unit is never marked
    /// redundant downstream.
    pub fn read_unit_texts(&self, path: &Path) -> Result<Vec<String>> {
        let doc = Document::load(path).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut texts = Vec::new();
        for (page_number, _) in doc.get_pages() {
            match doc.extract_text(&[page_number]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    log::warn!("page {}: text extraction failed: {}", page_number, e);
                    texts.push(String::new());
                }
            }
        }

        Ok(texts)
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::new()
    }
}

//! Slimmed PDF reconstruction.

use deckslim_core::{Error, RedundancyDecision, Result};
use lopdf::Document;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reconstructor producing a slimmed copy of a PDF.
///
/// Keeps exactly the pages not named by the decision, in original
/// order, by deleting the marked pages from a loaded copy of the
/// source. Output is written to a temp file in the destination
/// directory and renamed into place, or not at all.
pub struct PdfReconstructor;

impl PdfReconstructor {
    /// Create a new PDF reconstructor.
    pub fn new() -> Self {
        Self
    }

    /// Write a slimmed copy of `input` to `output`.
    pub fn write_slimmed(
        &self,
        input: &Path,
        output: &Path,
        decision: &RedundancyDecision,
    ) -> Result<()> {
        let mut doc = Document::load(input).map_err(|e| Error::PdfParse(e.to_string()))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let to_delete = pages_to_delete(&page_numbers, decision);

        // Delete highest-numbered pages first so remaining numbers stay valid
        for page_number in &to_delete {
            doc.delete_pages(&[*page_number]);
        }

        doc.prune_objects();
        doc.compress();

        let dir = output.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        doc.save_to(&mut tmp)
            .map_err(|e| Error::Reconstruct(format!("failed to save PDF: {}", e)))?;
        tmp.persist(output).map_err(|e| Error::Io(e.error))?;

        log::debug!(
            "wrote {} ({} of {} pages kept)",
            output.display(),
            page_numbers.len() - to_delete.len(),
            page_numbers.len()
        );
        Ok(())
    }
}

impl Default for PdfReconstructor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map 0-based unit indices from the decision onto the document's page
/// numbers, highest first.
fn pages_to_delete(page_numbers: &[u32], decision: &RedundancyDecision) -> Vec<u32> {
    let mut pages: Vec<u32> = decision
        .iter()
        .filter_map(|index| page_numbers.get(index).copied())
        .collect();
    pages.sort_unstable_by(|a, b| b.cmp(a));
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_to_delete_descending() {
        let decision = RedundancyDecision::from_indices([0, 2]);
        assert_eq!(pages_to_delete(&[1, 2, 3, 4], &decision), vec![3, 1]);
    }

    #[test]
    fn test_pages_to_delete_ignores_out_of_range() {
        let decision = RedundancyDecision::from_indices([0, 9]);
        assert_eq!(pages_to_delete(&[1, 2], &decision), vec![1]);
    }

    #[test]
    fn test_pages_to_delete_empty_decision() {
        let decision = RedundancyDecision::empty();
        assert!(pages_to_delete(&[1, 2, 3], &decision).is_empty());
    }
}

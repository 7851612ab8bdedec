//! Domain types for representing document content and slimming decisions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::normalize::LineNormalizer;

/// An ordered sequence of units (slides or pages) from one input file.
///
/// Unit indices are stable `0..N-1` positions reflecting original order;
/// that ordering is the only guarantee carried through the pipeline.
/// Documents are constructed once from the reader's raw per-unit text
/// and consumed read-only by the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Units in original order.
    units: Vec<Unit>,
}

impl Document {
    /// Build a document from raw per-unit text, normalizing each unit once.
    pub fn from_raw_texts<I, S>(texts: I, normalizer: &LineNormalizer) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let units = texts
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Unit::new(index, raw.into(), normalizer))
            .collect();
        Self { units }
    }

    /// Number of units in the document.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the document has no units at all.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Units in original order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// The unit at the given original position, if any.
    pub fn unit(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }
}

/// One slide or page of a document, the atomic element the detector
/// operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// 0-based position in the document.
    pub index: usize,

    /// Opaque text supplied by the format reader.
    pub raw_text: String,

    /// Normalized non-empty lines, derived once at construction.
    normalized_lines: Vec<String>,
}

impl Unit {
    /// Create a unit, deriving its normalized lines immediately.
    pub fn new(index: usize, raw_text: String, normalizer: &LineNormalizer) -> Self {
        let normalized_lines = normalizer.normalize(&raw_text);
        Self {
            index,
            raw_text,
            normalized_lines,
        }
    }

    /// Normalized lines in reading order.
    pub fn normalized_lines(&self) -> &[String] {
        &self.normalized_lines
    }

    /// Number of normalized lines.
    pub fn line_count(&self) -> usize {
        self.normalized_lines.len()
    }

    /// Total character count across all normalized lines.
    pub fn char_count(&self) -> usize {
        self.normalized_lines
            .iter()
            .map(|l| l.chars().count())
            .sum()
    }

    /// Whether the unit carries no visible content.
    pub fn is_blank(&self) -> bool {
        self.normalized_lines.is_empty()
    }
}

/// The format of the source document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// PDF document.
    Pdf,
    /// PPTX (Office Open XML) slide deck.
    Pptx,
}

impl DocumentFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        // PDF starts with "%PDF-"
        if bytes.starts_with(b"%PDF-") {
            return Some(Self::Pdf);
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        None
    }
}

/// The set of unit indices marked for removal.
///
/// Always a subset of `0..N-1`; an empty set means no redundancy was
/// found. The detector never marks the last unit, so applying a
/// decision to a non-empty document always retains at least one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedundancyDecision {
    indices: BTreeSet<usize>,
}

impl RedundancyDecision {
    /// Empty decision: nothing to remove.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a decision from the given unit indices.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Whether no units are marked.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of marked units.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the given unit is marked for removal.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Marked indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Indices retained after applying this decision to a document of
    /// `unit_count` units, in original order.
    pub fn retained_indices(&self, unit_count: usize) -> Vec<usize> {
        (0..unit_count).filter(|i| !self.contains(*i)).collect()
    }

    /// True if applying this decision to `unit_count` units would leave
    /// nothing behind. Impossible by construction (the last unit is
    /// never marked) but checked defensively before reconstruction.
    pub fn is_degenerate(&self, unit_count: usize) -> bool {
        unit_count > 0 && self.retained_indices(unit_count).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("pptx"), Some(DocumentFormat::Pptx));
        assert_eq!(DocumentFormat::from_extension("ppt"), None);
        assert_eq!(DocumentFormat::from_extension("docx"), None);
    }

    #[test]
    fn test_format_from_magic() {
        assert_eq!(
            DocumentFormat::from_magic(b"%PDF-1.7 rest"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00]),
            Some(DocumentFormat::Pptx)
        );
        assert_eq!(DocumentFormat::from_magic(b"GIF89a"), None);
        assert_eq!(DocumentFormat::from_magic(b""), None);
    }

    #[test]
    fn test_unit_counts() {
        let normalizer = LineNormalizer::new();
        let unit = Unit::new(0, "Title\n  Point  A \n\n".to_string(), &normalizer);

        assert_eq!(unit.line_count(), 2);
        assert_eq!(unit.normalized_lines(), ["Title", "Point A"]);
        assert_eq!(unit.char_count(), 5 + 7);
        assert!(!unit.is_blank());

        let blank = Unit::new(1, "   \n\t\n".to_string(), &normalizer);
        assert!(blank.is_blank());
        assert_eq!(blank.char_count(), 0);
    }

    #[test]
    fn test_decision_retained_indices_preserve_order() {
        let decision = RedundancyDecision::from_indices([0, 2]);
        assert_eq!(decision.retained_indices(4), vec![1, 3]);
    }

    #[test]
    fn test_decision_degenerate() {
        let decision = RedundancyDecision::from_indices([0, 1, 2]);
        assert!(decision.is_degenerate(3));
        assert!(!decision.is_degenerate(4));
        assert!(!RedundancyDecision::empty().is_degenerate(3));
    }
}

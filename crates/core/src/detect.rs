//! Progressive-reveal redundancy detection.
//!
//! Scans adjacent unit pairs in original order, marking a unit for
//! removal when the next unit's content grew (by character or line
//! count) and fuzzily contains everything the unit shows. A chain of
//! progressively growing units therefore has all but its last member
//! marked, since every pair is evaluated against original content.

use rayon::prelude::*;

use crate::matcher::{is_fuzzy_subset, DEFAULT_SIMILARITY_THRESHOLD};
use crate::types::{Document, RedundancyDecision, Unit};

/// Tunable parameters for redundancy detection.
///
/// The similarity threshold is an empirically chosen constant with no
/// documented derivation; it is exposed here rather than hard-coded.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Minimum similarity ratio for a line to count as contained.
    pub similarity_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    /// Config with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the similarity threshold.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}

/// Find the units made redundant by their immediate successor.
///
/// Single pass over adjacent pairs `i = 0..N-2`; each pair reads only
/// immutable unit content, so the pairs are evaluated in parallel and
/// the marked indices merged afterwards. Documents with fewer than two
/// units trivially yield an empty decision, and index `N-1` is never
/// marked.
pub fn detect_redundant_units(document: &Document, config: &DetectorConfig) -> RedundancyDecision {
    let units = document.units();
    if units.len() < 2 {
        return RedundancyDecision::empty();
    }

    let marked: Vec<usize> = (0..units.len() - 1)
        .into_par_iter()
        .filter(|&i| pair_is_redundant(&units[i], &units[i + 1], config.similarity_threshold))
        .collect();

    let decision = RedundancyDecision::from_indices(marked);
    log::debug!(
        "detected {} redundant of {} units",
        decision.len(),
        units.len()
    );
    decision
}

/// Whether `current` is a progressive-reveal predecessor of `next`.
fn pair_is_redundant(current: &Unit, next: &Unit, threshold: f64) -> bool {
    // An empty unit carries no content to make redundant
    if current.is_blank() {
        return false;
    }

    // Growth gate: either signal alone is sufficient
    let content_grew = next.char_count() > current.char_count()
        || next.line_count() > current.line_count();
    if !content_grew {
        return false;
    }

    is_fuzzy_subset(current.normalized_lines(), next.normalized_lines(), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::LineNormalizer;

    fn document(unit_texts: &[&str]) -> Document {
        let normalizer = LineNormalizer::new();
        Document::from_raw_texts(unit_texts.iter().copied(), &normalizer)
    }

    fn detect(unit_texts: &[&str]) -> RedundancyDecision {
        detect_redundant_units(&document(unit_texts), &DetectorConfig::default())
    }

    #[test]
    fn test_empty_document() {
        assert!(detect(&[]).is_empty());
    }

    #[test]
    fn test_single_unit() {
        assert!(detect(&["Title\nPoint A"]).is_empty());
    }

    #[test]
    fn test_build_up_chain_marks_all_but_last() {
        let decision = detect(&[
            "Title\nPoint A",
            "Title\nPoint A\nPoint B",
            "Title\nPoint A\nPoint B\nPoint C",
        ]);
        assert_eq!(decision, RedundancyDecision::from_indices([0, 1]));
    }

    #[test]
    fn test_last_unit_never_marked() {
        let decision = detect(&[
            "Title",
            "Title\nPoint A",
            "Title\nPoint A\nPoint B",
        ]);
        assert!(!decision.contains(2));
    }

    #[test]
    fn test_identical_units_not_marked() {
        // Duplicate-but-not-growing content is preserved; the detector
        // targets progressive reveals, not plain duplicates.
        let decision = detect(&["Title\nPoint A", "Title\nPoint A"]);
        assert!(decision.is_empty());
    }

    #[test]
    fn test_similar_without_growth_not_marked() {
        // "Hello wrold" vs "Hello world": ratio above threshold but
        // neither line count nor char count grew, so the growth gate
        // alone decides.
        let decision = detect(&["Hello wrold", "Hello world"]);
        assert!(decision.is_empty());
    }

    #[test]
    fn test_prefix_continuation_marked() {
        let decision = detect(&["Agenda item 1", "Agenda item 1 expanded detail here"]);
        assert_eq!(decision, RedundancyDecision::from_indices([0]));
    }

    #[test]
    fn test_blank_unit_never_marked() {
        let decision = detect(&["   \n\t", "Title\nPoint A"]);
        assert!(decision.is_empty());
    }

    #[test]
    fn test_line_split_growth_still_fires() {
        // Char count shrinks but line count grows; the subset check
        // then governs. The split halves are not fuzzily contained in
        // the original single line by ratio, and prefix only matches
        // the first half, so nothing is marked here.
        let decision = detect(&["Alpha beta gamma delta", "Alpha beta\ngamma"]);
        assert!(decision.is_empty());
    }

    #[test]
    fn test_growth_without_subset_not_marked() {
        let decision = detect(&["Completely different content", "Title\nPoint A\nPoint B"]);
        assert!(decision.is_empty());
    }

    #[test]
    fn test_noisy_line_still_contained() {
        // One-character typo in a long line stays above the 0.9 ratio
        let decision = detect(&[
            "Introduction slide\nThe quick brovn fox jumps",
            "Introduction slide\nThe quick brown fox jumps\nOver the lazy dog",
        ]);
        assert_eq!(decision, RedundancyDecision::from_indices([0]));
    }

    #[test]
    fn test_custom_threshold() {
        // With a permissive threshold, loosely similar lines count as
        // contained once content grows.
        let config = DetectorConfig::new().with_similarity_threshold(0.5);
        let doc = document(&["Point A noted", "Point A different\nPoint B"]);
        let decision = detect_redundant_units(&doc, &config);
        assert_eq!(decision, RedundancyDecision::from_indices([0]));
    }

    #[test]
    fn test_decision_never_degenerate() {
        let decision = detect(&[
            "A",
            "A\nB",
            "A\nB\nC",
            "A\nB\nC\nD",
        ]);
        assert!(!decision.is_degenerate(4));
        assert_eq!(decision.retained_indices(4), vec![3]);
    }
}

//! Fuzzy containment matching between normalized lines.
//!
//! A line counts as "present" in another unit either by character-level
//! similarity ratio or by being a verbatim prefix of a longer line.
//! Exact-match containment alone is too brittle against OCR noise and
//! re-wrapping, and the ratio alone misses short lines that a later
//! unit continues, so both rules are applied per pool member.

use similar::TextDiff;

/// Default similarity threshold for line containment.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.9;

/// Character-level similarity ratio between two strings.
///
/// Twice the number of matching characters divided by the total length
/// of both strings, as computed from a character diff. Symmetric,
/// bounded in `[0, 1]`, and `1.0` for identical strings.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// Whether `candidate` is fuzzily contained in `pool`.
///
/// True when some pool line has a similarity ratio to `candidate` of at
/// least `threshold`, or when some pool line is strictly longer than
/// `candidate` and starts with it verbatim (a continuation of the
/// candidate). Returns on the first matching pool line.
pub fn line_is_contained(candidate: &str, pool: &[String], threshold: f64) -> bool {
    pool.iter().any(|line| {
        similarity_ratio(candidate, line) >= threshold
            || (line.len() > candidate.len() && line.starts_with(candidate))
    })
}

/// Whether every line of `lines_a` is fuzzily contained in `lines_b`.
///
/// The empty sequence is a subset of anything; a non-empty sequence is
/// never a subset of an empty one. A single uncontained line
/// disqualifies the whole unit.
pub fn is_fuzzy_subset(lines_a: &[String], lines_b: &[String], threshold: f64) -> bool {
    if lines_a.is_empty() {
        return true;
    }
    if lines_b.is_empty() {
        return false;
    }
    lines_a
        .iter()
        .all(|line| line_is_contained(line, lines_b, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ratio_identical() {
        assert_eq!(similarity_ratio("Amazing grace", "Amazing grace"), 1.0);
    }

    #[test]
    fn test_ratio_symmetric() {
        let ab = similarity_ratio("Hello wrold", "Hello world");
        let ba = similarity_ratio("Hello world", "Hello wrold");
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_ratio_transposition_above_threshold() {
        // Adjacent transposition in an 11-char string: 2*10/22 ~ 0.909
        let ratio = similarity_ratio("Hello wrold", "Hello world");
        assert!(ratio >= 0.9, "ratio was {ratio}");
        assert!(ratio < 1.0);
    }

    #[test]
    fn test_ratio_disjoint() {
        assert!(similarity_ratio("aaaa", "bbbb") < 0.1);
    }

    #[test]
    fn test_contained_by_similarity() {
        let pool = lines(&["Hello world", "Another line"]);
        assert!(line_is_contained("Hello wrold", &pool, 0.9));
        assert!(!line_is_contained("Completely different", &pool, 0.9));
    }

    #[test]
    fn test_contained_by_prefix() {
        // Ratio between a short line and its long continuation is well
        // below threshold; the prefix rule has to catch it.
        let pool = lines(&["Agenda item 1 with much more detail added"]);
        assert!(similarity_ratio("Agenda item 1", &pool[0]) < 0.9);
        assert!(line_is_contained("Agenda item 1", &pool, 0.9));
    }

    #[test]
    fn test_prefix_rule_requires_strictly_longer() {
        let pool = lines(&["Agenda item 1"]);
        // Equal line matches via the ratio, not the prefix rule
        assert!(line_is_contained("Agenda item 1", &pool, 0.9));
        // A pool line shorter than the candidate never prefix-matches
        let short_pool = lines(&["Agenda"]);
        assert!(!line_is_contained("Agenda item 1", &short_pool, 0.9));
    }

    #[test]
    fn test_empty_pool_contains_nothing() {
        assert!(!line_is_contained("anything", &[], 0.9));
    }

    #[test]
    fn test_empty_subset_laws() {
        let some = lines(&["a line"]);
        assert!(is_fuzzy_subset(&[], &some, 0.9));
        assert!(is_fuzzy_subset(&[], &[], 0.9));
        assert!(!is_fuzzy_subset(&some, &[], 0.9));
    }

    #[test]
    fn test_subset_all_quantified() {
        let a = lines(&["Title", "Point A", "Point B"]);
        let b = lines(&["Title", "Point A", "Point B", "Point C"]);
        assert!(is_fuzzy_subset(&a, &b, 0.9));

        // One uncontained line disqualifies the whole unit
        let a_extra = lines(&["Title", "Point A", "Unrelated content entirely"]);
        assert!(!is_fuzzy_subset(&a_extra, &b, 0.9));
    }
}

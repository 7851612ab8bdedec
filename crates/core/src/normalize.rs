//! Line normalization for unit text.
//!
//! Canonicalizes the raw text of a slide or page into comparable line
//! tokens: whitespace runs collapse to a single space, lines are
//! trimmed, and lines that end up empty are dropped.

use regex::Regex;
use std::sync::LazyLock;

/// Regex to collapse runs of whitespace characters into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalizer turning raw unit text into comparison-ready lines.
///
/// Normalization is deterministic and idempotent: re-joining the output
/// with newlines and normalizing again yields the same sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineNormalizer;

impl LineNormalizer {
    /// Create a new line normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize raw text into an ordered sequence of non-empty lines.
    ///
    /// - Splits on line boundaries (`\n`, `\r\n`, `\r`)
    /// - Collapses whitespace runs to a single ASCII space
    /// - Trims leading/trailing whitespace per line
    /// - Discards lines that become empty
    ///
    /// Empty input yields an empty vec; there are no error conditions.
    pub fn normalize(&self, raw_text: &str) -> Vec<String> {
        let unified = raw_text.replace("\r\n", "\n").replace('\r', "\n");

        unified
            .lines()
            .map(|line| {
                WHITESPACE_COLLAPSE_REGEX
                    .replace_all(line, " ")
                    .trim()
                    .to_string()
            })
            .filter(|line| !line.is_empty())
            .collect()
    }
}

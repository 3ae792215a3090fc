//! Core data types that flow through the detection pipeline.
//!
//! Blocks are stored once, in a single `Vec<ContentBlock>` owned by the run.
//! Everything downstream (buckets, candidate pairs, matches) refers to a
//! block by its position in that vector and to a document by its
//! [`SourceId`].

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::fingerprint::Fingerprint;

/// A raw document handed to the pipeline by a connector.
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable identifier, e.g. a root-relative path.
    pub id: String,
    /// Full decoded text.
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Position of a [`Document`] in the run's document list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceId(pub usize);

/// One enclosing Markdown heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1–6.
    pub level: u8,
    pub title: String,
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.level {
            f.write_str("#")?;
        }
        write!(f, " {}", self.title)
    }
}

/// A cleaned paragraph as produced by the extractor, before tokenizing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub headings: Vec<Heading>,
    pub text: String,
}

/// The unit of comparison.
///
/// # Invariants
///
/// - `words` is non-empty for every block that passed the minimum-word filter.
/// - `fingerprint` is a pure function of `words`.
/// - `text` keeps the original wording; scoring only ever looks at `words`.
#[derive(Debug, Clone)]
pub struct ContentBlock {
    pub source: SourceId,
    pub headings: Vec<Heading>,
    pub text: String,
    pub words: BTreeSet<String>,
    pub fingerprint: Fingerprint,
}

impl ContentBlock {
    /// Heading path rendered as `# Guide > ## Install`. Empty at top level.
    pub fn heading_path(&self) -> String {
        self.headings
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

/// Unordered pair of block indices, stored as `(smaller, larger)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CandidatePair {
    pub a: usize,
    pub b: usize,
}

impl CandidatePair {
    /// Normalize two distinct indices into a pair. Returns `None` for `i == j`.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        match i.cmp(&j) {
            std::cmp::Ordering::Less => Some(Self { a: i, b: j }),
            std::cmp::Ordering::Greater => Some(Self { a: j, b: i }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A scored candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub pair: CandidatePair,
    /// Jaccard similarity in `[0.0, 1.0]`.
    pub score: f64,
    /// Bits that differ between the two fingerprints.
    pub hamming: u32,
}

/// Extraction counters for one run.
///
/// `paragraphs == code_rejected + short_rejected + blocks` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlockStats {
    pub documents: usize,
    pub paragraphs: usize,
    pub code_rejected: usize,
    pub short_rejected: usize,
    pub blocks: usize,
}

impl BlockStats {
    pub(crate) fn merge(mut self, other: BlockStats) -> Self {
        self.documents += other.documents;
        self.paragraphs += other.paragraphs;
        self.code_rejected += other.code_rejected;
        self.short_rejected += other.short_rejected;
        self.blocks += other.blocks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_normalizes_order() {
        assert_eq!(CandidatePair::new(7, 3), Some(CandidatePair { a: 3, b: 7 }));
        assert_eq!(CandidatePair::new(3, 7), CandidatePair::new(7, 3));
        assert_eq!(CandidatePair::new(4, 4), None);
    }

    #[test]
    fn test_heading_path_rendering() {
        let block = ContentBlock {
            source: SourceId(0),
            headings: vec![
                Heading {
                    level: 1,
                    title: "Guide".to_string(),
                },
                Heading {
                    level: 3,
                    title: "Install".to_string(),
                },
            ],
            text: String::new(),
            words: BTreeSet::new(),
            fingerprint: Fingerprint::default(),
        };
        assert_eq!(block.heading_path(), "# Guide > ### Install");
    }

    #[test]
    fn test_scored_match_serializes() {
        let m = ScoredMatch {
            pair: CandidatePair { a: 1, b: 2 },
            score: 0.5,
            hamming: 3,
        };
        let json = serde_json::to_value(m).unwrap();
        assert_eq!(json["pair"]["a"], 1);
        assert_eq!(json["score"], 0.5);
    }
}

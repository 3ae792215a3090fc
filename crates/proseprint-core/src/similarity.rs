//! Exact Jaccard scoring and ranking of candidate pairs.
//!
//! # Ranking
//!
//! Matches are sorted by score (desc), then by pair (`a` asc, `b` asc),
//! then truncated. Candidate order never leaks into the output, so a run is
//! reproducible whether or not scoring ran in parallel.

use std::cmp::Ordering;
use std::collections::BTreeSet;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::candidates::all_pairs;
use crate::models::{CandidatePair, ContentBlock, ScoredMatch};

/// Intersection over union of two sets.
///
/// Two empty sets score `1.0`; one empty and one non-empty set score `0.0`.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}

fn score_pair(blocks: &[ContentBlock], pair: CandidatePair) -> ScoredMatch {
    let (a, b) = (&blocks[pair.a], &blocks[pair.b]);
    ScoredMatch {
        pair,
        score: jaccard(&a.words, &b.words),
        hamming: a.fingerprint.hamming_distance(&b.fingerprint),
    }
}

#[cfg(feature = "rayon")]
fn score_all(blocks: &[ContentBlock], pairs: &[CandidatePair]) -> Vec<ScoredMatch> {
    pairs.par_iter().map(|&p| score_pair(blocks, p)).collect()
}

#[cfg(not(feature = "rayon"))]
fn score_all(blocks: &[ContentBlock], pairs: &[CandidatePair]) -> Vec<ScoredMatch> {
    pairs.iter().map(|&p| score_pair(blocks, p)).collect()
}

/// Total order used for final ranking.
pub fn rank_order(x: &ScoredMatch, y: &ScoredMatch) -> Ordering {
    y.score.total_cmp(&x.score).then(x.pair.cmp(&y.pair))
}

/// Score candidates, keep those at or above `threshold`, rank and cap.
pub fn score_candidates(
    blocks: &[ContentBlock],
    pairs: &[CandidatePair],
    threshold: f64,
    max_pairs: usize,
) -> Vec<ScoredMatch> {
    let mut matches: Vec<ScoredMatch> = score_all(blocks, pairs)
        .into_iter()
        .filter(|m| m.score >= threshold)
        .collect();
    matches.sort_by(rank_order);
    matches.truncate(max_pairs);
    matches
}

/// Which pairs [`top_pairs`] considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairScope {
    /// Both blocks from the same document.
    SameSource,
    /// Blocks from different documents.
    CrossSource,
    Any,
}

/// The `n` highest-scoring pairs in `scope`, with no threshold.
///
/// Quadratic. Meant for calibrating `jaccard_threshold` on a corpus, not
/// for regular runs.
pub fn top_pairs(blocks: &[ContentBlock], scope: PairScope, n: usize) -> Vec<ScoredMatch> {
    let pairs: Vec<CandidatePair> = all_pairs(blocks, true)
        .into_iter()
        .filter(|p| {
            let same = blocks[p.a].source == blocks[p.b].source;
            match scope {
                PairScope::SameSource => same,
                PairScope::CrossSource => !same,
                PairScope::Any => true,
            }
        })
        .collect();
    score_candidates(blocks, &pairs, 0.0, n)
}

//! Candidate pair generation by fingerprint banding (LSH).
//!
//! Each 64-bit fingerprint is cut into `bands` contiguous slices. Blocks
//! that agree on every bit of at least one slice land in a shared bucket,
//! and every pair inside a bucket becomes a candidate. Two blocks whose
//! fingerprints differ somewhere in every band are never proposed, even if
//! their overall Hamming distance is small; that is the usual LSH trade.
//!
//! [`all_pairs`] is the exhaustive alternative: every eligible pair, at
//! quadratic cost.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::DetectError;
use crate::fingerprint::FINGERPRINT_BITS;
use crate::models::{CandidatePair, ContentBlock};

/// Default cap on bucket size before pairing.
pub const DEFAULT_BUCKET_CAP: usize = 300;

/// A band count that evenly divides the fingerprint width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bands(usize);

impl Bands {
    pub fn new(count: usize) -> Result<Self, DetectError> {
        if count == 0 || FINGERPRINT_BITS % count != 0 {
            return Err(DetectError::InvalidBands(count));
        }
        Ok(Self(count))
    }

    pub fn count(&self) -> usize {
        self.0
    }

    /// Bits per band.
    pub fn width(&self) -> usize {
        FINGERPRINT_BITS / self.0
    }
}

/// Group block indices by `(band index, band value)`.
///
/// Indices inside each bucket are in ascending order.
pub fn band_buckets(blocks: &[ContentBlock], bands: Bands) -> HashMap<(usize, u64), Vec<usize>> {
    let width = bands.width();
    let mut buckets: HashMap<(usize, u64), Vec<usize>> = HashMap::new();
    for (idx, block) in blocks.iter().enumerate() {
        for band in 0..bands.count() {
            buckets
                .entry((band, block.fingerprint.band(band, width)))
                .or_default()
                .push(idx);
        }
    }
    buckets
}

/// Banded candidate generation.
///
/// Buckets larger than `bucket_cap` are truncated to their first
/// `bucket_cap` members before pairing. Same-source pairs are dropped
/// unless `same_source_allowed`. The result is deduplicated and sorted.
pub fn generate_candidates(
    blocks: &[ContentBlock],
    bands: Bands,
    bucket_cap: usize,
    same_source_allowed: bool,
) -> Vec<CandidatePair> {
    let buckets = band_buckets(blocks, bands);
    let mut seen: HashSet<CandidatePair> = HashSet::new();
    let mut truncated = 0usize;

    for members in buckets.values() {
        if members.len() < 2 {
            continue;
        }
        let members = if members.len() > bucket_cap {
            truncated += 1;
            &members[..bucket_cap]
        } else {
            &members[..]
        };

        for (n, &i) in members.iter().enumerate() {
            for &j in &members[n + 1..] {
                let Some(pair) = CandidatePair::new(i, j) else {
                    continue;
                };
                if !same_source_allowed && blocks[pair.a].source == blocks[pair.b].source {
                    continue;
                }
                seen.insert(pair);
            }
        }
    }

    debug!(
        buckets = buckets.len(),
        truncated,
        candidates = seen.len(),
        "generated banded candidates"
    );

    let mut pairs: Vec<CandidatePair> = seen.into_iter().collect();
    pairs.sort_unstable();
    pairs
}

/// Every pair `i < j`, minus same-source pairs unless `same_source_allowed`.
pub fn all_pairs(blocks: &[ContentBlock], same_source_allowed: bool) -> Vec<CandidatePair> {
    let mut pairs = Vec::new();
    for i in 0..blocks.len() {
        for j in i + 1..blocks.len() {
            if !same_source_allowed && blocks[i].source == blocks[j].source {
                continue;
            }
            pairs.push(CandidatePair { a: i, b: j });
        }
    }
    pairs
}

/// Bucket sizes (buckets with two or more members), largest first.
pub fn bucket_sizes(blocks: &[ContentBlock], bands: Bands) -> Vec<usize> {
    let mut sizes: Vec<usize> = band_buckets(blocks, bands)
        .values()
        .map(Vec::len)
        .filter(|&n| n >= 2)
        .collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

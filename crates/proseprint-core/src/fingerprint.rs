//! 64-bit SimHash fingerprints over content-word sets.
//!
//! Each distinct word is hashed with SHA-256 (first 8 bytes, big-endian).
//! Every hash votes +1 or -1 on each of the 64 bit positions; an output bit
//! is set when its vote total is strictly positive. Sets that share most of
//! their words end up a small Hamming distance apart, unrelated sets about
//! 32 bits apart.
//!
//! Voting is a sum, so the result does not depend on iteration order.

use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

/// Number of bits in a [`Fingerprint`].
pub const FINGERPRINT_BITS: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    /// Fingerprint a content-word set. The empty set maps to `Fingerprint(0)`.
    pub fn from_words(words: &BTreeSet<String>) -> Self {
        simhash(words.iter().map(String::as_str))
    }

    pub fn hamming_distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }

    /// Bits `index * width .. (index + 1) * width`, shifted down to bit 0.
    pub fn band(&self, index: usize, width: usize) -> u64 {
        let mask = if width >= FINGERPRINT_BITS {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        (self.0 >> (index * width)) & mask
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// SimHash over words the caller guarantees to be distinct.
pub fn simhash<'a, I>(words: I) -> Fingerprint
where
    I: IntoIterator<Item = &'a str>,
{
    let mut votes = [0i64; FINGERPRINT_BITS];
    for word in words {
        let h = word_hash(word);
        for (i, vote) in votes.iter_mut().enumerate() {
            if (h >> i) & 1 == 1 {
                *vote += 1;
            } else {
                *vote -= 1;
            }
        }
    }

    let mut out = 0u64;
    for (i, vote) in votes.iter().enumerate() {
        if *vote > 0 {
            out |= 1u64 << i;
        }
    }
    Fingerprint(out)
}

/// First 64 bits of the SHA-256 digest of `word`.
pub fn word_hash(word: &str) -> u64 {
    let digest = Sha256::digest(word.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

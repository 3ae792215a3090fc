//! Errors surfaced by the detection pipeline.

use thiserror::Error;

/// Parameter errors reported before any document is processed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectError {
    /// The band count must be at least 1 and divide the 64 fingerprint bits.
    #[error("bands must evenly divide 64 (got {0})")]
    InvalidBands(usize),

    /// The similarity threshold must lie in `[0.0, 1.0]`.
    #[error("jaccard_threshold must be in [0.0, 1.0] (got {0})")]
    InvalidThreshold(f64),

    /// A minimum of zero words would admit empty paragraphs.
    #[error("min_words must be >= 1")]
    InvalidMinWords,
}

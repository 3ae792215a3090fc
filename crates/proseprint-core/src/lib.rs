//! # proseprint core
//!
//! Near-duplicate prose detection for Markdown corpora: paragraph
//! extraction, content-word normalization, SimHash fingerprints, LSH
//! banding and exact Jaccard scoring.
//!
//! This crate does no filesystem I/O and never prints. Callers hand it a
//! list of [`models::Document`]s and a [`pipeline::DetectParams`] and get
//! back ranked [`models::ScoredMatch`]es that index into the block arena.
//!
//! ```rust
//! use proseprint_core::models::Document;
//! use proseprint_core::pipeline::{detect, DetectParams};
//!
//! let text = "Rotate the signing keys every quarter and record each rotation in the audit log.";
//! let docs = vec![Document::new("a.md", text), Document::new("b.md", text)];
//! let params = DetectParams { min_words: 5, ..DetectParams::default() };
//!
//! let detection = detect(&docs, &params).unwrap();
//! assert_eq!(detection.matches.len(), 1);
//! assert_eq!(detection.matches[0].score, 1.0);
//! ```

pub mod candidates;
pub mod codelike;
pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod models;
pub mod pipeline;
pub mod similarity;
pub mod tokenize;

pub use error::DetectError;

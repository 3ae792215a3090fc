//! End-to-end near-duplicate detection over a document list.
//!
//! ```text
//! documents ─▶ extract ─▶ code filter ─▶ content words ─▶ fingerprint
//!                                                              │
//!            ranked matches ◀─ Jaccard ◀─ candidates (bands | all pairs)
//! ```
//!
//! [`detect`] validates [`DetectParams`] before touching any document, so a
//! bad band count fails fast with [`DetectError::InvalidBands`].

use std::collections::BTreeSet;

use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::candidates::{all_pairs, generate_candidates, Bands, DEFAULT_BUCKET_CAP};
use crate::codelike::CodeFilter;
use crate::error::DetectError;
use crate::extract::extract_paragraphs;
use crate::fingerprint::Fingerprint;
use crate::models::{BlockStats, ContentBlock, Document, ScoredMatch, SourceId};
use crate::similarity::score_candidates;
use crate::tokenize::{content_words, tokenize};

/// Detection tuning parameters, decoupled from application config.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectParams {
    /// Minimum word count, applied to raw tokens and again to content words.
    pub min_words: usize,
    /// Minimum Jaccard score to report.
    pub jaccard_threshold: f64,
    /// Maximum matches returned.
    pub max_pairs: usize,
    /// Band count; must divide 64.
    pub bands: usize,
    /// Buckets larger than this are truncated before pairing.
    pub bucket_cap: usize,
    /// Whether two blocks of the same document may match.
    pub same_source_allowed: bool,
    /// Score every pair instead of banded candidates.
    pub exhaustive: bool,
    pub code_filter: CodeFilter,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            min_words: 20,
            jaccard_threshold: 0.85,
            max_pairs: 200,
            bands: 4,
            bucket_cap: DEFAULT_BUCKET_CAP,
            same_source_allowed: false,
            exhaustive: false,
            code_filter: CodeFilter::default(),
        }
    }
}

impl DetectParams {
    /// Check every parameter, returning the validated band count.
    pub fn validate(&self) -> Result<Bands, DetectError> {
        let bands = Bands::new(self.bands)?;
        if !(0.0..=1.0).contains(&self.jaccard_threshold) {
            return Err(DetectError::InvalidThreshold(self.jaccard_threshold));
        }
        if self.min_words == 0 {
            return Err(DetectError::InvalidMinWords);
        }
        Ok(bands)
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct Detection {
    pub blocks: Vec<ContentBlock>,
    pub stats: BlockStats,
    /// Number of pairs that were scored.
    pub candidates: usize,
    pub matches: Vec<ScoredMatch>,
}

/// Extract, filter, tokenize and fingerprint one document.
pub fn document_blocks(
    source: SourceId,
    text: &str,
    min_words: usize,
    filter: &CodeFilter,
) -> (Vec<ContentBlock>, BlockStats) {
    let mut stats = BlockStats {
        documents: 1,
        ..BlockStats::default()
    };
    let mut blocks = Vec::new();

    for paragraph in extract_paragraphs(text, min_words) {
        stats.paragraphs += 1;
        if filter.looks_like_code(&paragraph.text) {
            stats.code_rejected += 1;
            continue;
        }
        // Repeated content words count toward the minimum.
        let content = content_words(&tokenize(&paragraph.text));
        if content.len() < min_words {
            stats.short_rejected += 1;
            continue;
        }
        let words: BTreeSet<String> = content.into_iter().collect();
        blocks.push(ContentBlock {
            source,
            headings: paragraph.headings,
            text: paragraph.text,
            fingerprint: Fingerprint::from_words(&words),
            words,
        });
    }

    stats.blocks = blocks.len();
    (blocks, stats)
}

#[cfg(feature = "rayon")]
fn per_document(
    documents: &[Document],
    min_words: usize,
    filter: &CodeFilter,
) -> Vec<(Vec<ContentBlock>, BlockStats)> {
    documents
        .par_iter()
        .enumerate()
        .map(|(i, doc)| document_blocks(SourceId(i), &doc.text, min_words, filter))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn per_document(
    documents: &[Document],
    min_words: usize,
    filter: &CodeFilter,
) -> Vec<(Vec<ContentBlock>, BlockStats)> {
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| document_blocks(SourceId(i), &doc.text, min_words, filter))
        .collect()
}

/// Build the block arena for all documents, in document order.
pub fn build_blocks(
    documents: &[Document],
    min_words: usize,
    filter: &CodeFilter,
) -> (Vec<ContentBlock>, BlockStats) {
    let mut blocks = Vec::new();
    let mut stats = BlockStats::default();
    for (doc_blocks, doc_stats) in per_document(documents, min_words, filter) {
        blocks.extend(doc_blocks);
        stats = stats.merge(doc_stats);
    }
    debug!(
        documents = stats.documents,
        paragraphs = stats.paragraphs,
        code_rejected = stats.code_rejected,
        short_rejected = stats.short_rejected,
        blocks = stats.blocks,
        "built content blocks"
    );
    (blocks, stats)
}

/// Run the full pipeline.
pub fn detect(documents: &[Document], params: &DetectParams) -> Result<Detection, DetectError> {
    let bands = params.validate()?;

    let (blocks, stats) = build_blocks(documents, params.min_words, &params.code_filter);
    let pairs = if params.exhaustive {
        all_pairs(&blocks, params.same_source_allowed)
    } else {
        generate_candidates(
            &blocks,
            bands,
            params.bucket_cap,
            params.same_source_allowed,
        )
    };
    let matches = score_candidates(
        &blocks,
        &pairs,
        params.jaccard_threshold,
        params.max_pairs,
    );

    info!(
        blocks = blocks.len(),
        candidates = pairs.len(),
        matches = matches.len(),
        exhaustive = params.exhaustive,
        "detection finished"
    );

    Ok(Detection {
        blocks,
        stats,
        candidates: pairs.len(),
        matches,
    })
}

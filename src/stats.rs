//! Corpus statistics for threshold and band tuning.
//!
//! Shows how many paragraphs survive each filter and how the fingerprint
//! bands spread blocks across buckets. Oversized buckets mean the bucket
//! cap is dropping candidates; try more bands.

use anyhow::{Context, Result};
use proseprint_core::candidates::{bucket_sizes, generate_candidates};
use proseprint_core::pipeline::build_blocks;

use crate::config::Config;
use crate::connector_fs;
use std::path::Path;

pub fn run_stats(config: &Config, root: &Path) -> Result<()> {
    let params = config.detect_params();
    let bands = params.validate().context("Invalid detection parameters")?;

    let documents = connector_fs::scan_documents(&config.scan, root)?;
    let (blocks, stats) = build_blocks(&documents, params.min_words, &params.code_filter);

    let sizes = bucket_sizes(&blocks, bands);
    let oversized = sizes.iter().filter(|&&n| n > params.bucket_cap).count();
    let candidates = generate_candidates(
        &blocks,
        bands,
        params.bucket_cap,
        params.same_source_allowed,
    )
    .len();
    let all_pairs = blocks.len() * blocks.len().saturating_sub(1) / 2;

    println!("proseprint — Corpus Stats");
    println!("=========================");
    println!();
    println!("  Root:            {}", root.display());
    println!("  Documents:       {}", stats.documents);
    println!("  Paragraphs:      {}", stats.paragraphs);
    println!("  Code-like:       {}", stats.code_rejected);
    println!("  Too few words:   {}", stats.short_rejected);
    println!("  Blocks:          {}", stats.blocks);
    println!();
    println!(
        "  Bands:           {} × {} bits",
        bands.count(),
        bands.width()
    );
    println!("  Shared buckets:  {}", sizes.len());
    println!(
        "  Largest bucket:  {}",
        sizes.first().copied().unwrap_or(0)
    );
    println!(
        "  Over cap ({}):  {}",
        params.bucket_cap, oversized
    );
    println!(
        "  Candidates:      {} of {} pairs ({}%)",
        candidates,
        all_pairs,
        if all_pairs > 0 {
            (candidates * 100) / all_pairs
        } else {
            0
        }
    );

    Ok(())
}

//! Diagnostic commands: `blocks` lists what the extractor kept, `inspect`
//! shows the best-scoring pairs regardless of threshold.

use anyhow::Result;
use clap::ValueEnum;
use proseprint_core::pipeline::build_blocks;
use proseprint_core::similarity::{top_pairs, PairScope};
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::connector_fs;
use crate::report::{self, BlockView, OutputFormat};

/// Which pairs `inspect` ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// Pairs within one document.
    Same,
    /// Pairs across documents.
    Cross,
    Any,
}

impl From<Scope> for PairScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Same => PairScope::SameSource,
            Scope::Cross => PairScope::CrossSource,
            Scope::Any => PairScope::Any,
        }
    }
}

pub fn run_blocks(config: &Config, root: &Path, format: OutputFormat) -> Result<()> {
    let documents = connector_fs::scan_documents(&config.scan, root)?;
    let (blocks, _) = build_blocks(
        &documents,
        config.detection.min_words,
        &config.code_filter,
    );
    let views: Vec<BlockView> = (0..blocks.len())
        .map(|i| BlockView::new(&documents, &blocks, i))
        .collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => report::write_json(&mut out, &views)?,
        OutputFormat::Text => {
            if views.is_empty() {
                eprintln!("No eligible blocks found.");
                return Ok(());
            }
            report::write_blocks_text(&mut out, &views)?;
        }
    }
    Ok(())
}

pub fn run_inspect(
    config: &Config,
    root: &Path,
    top: usize,
    scope: Scope,
    format: OutputFormat,
) -> Result<()> {
    let documents = connector_fs::scan_documents(&config.scan, root)?;
    let (blocks, _) = build_blocks(
        &documents,
        config.detection.min_words,
        &config.code_filter,
    );
    let ranked = top_pairs(&blocks, scope.into(), top);
    let views = report::match_views(&documents, &blocks, &ranked);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => report::write_json(&mut out, &views)?,
        OutputFormat::Text => {
            if views.is_empty() {
                writeln!(out, "No pairs to inspect.")?;
                return Ok(());
            }
            for (i, m) in views.iter().enumerate() {
                writeln!(
                    out,
                    "{}. [{:.3}] hamming={} {} #{} <-> {} #{}",
                    i + 1,
                    m.score,
                    m.hamming,
                    m.a.document,
                    m.a.index,
                    m.b.document,
                    m.b.index
                )?;
                writeln!(out, "    A: {}", report::snippet(m.a.text, 120))?;
                writeln!(out, "    B: {}", report::snippet(m.b.text, 120))?;
            }
        }
    }
    Ok(())
}

//! The `find` command: scan a directory and report near-duplicate passages.

use anyhow::{Context, Result};
use proseprint_core::pipeline::detect;
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::connector_fs;
use crate::report::{self, MatchReport, OutputFormat};

pub fn run_find(config: &Config, root: &Path, format: OutputFormat, show_full: bool) -> Result<()> {
    let documents = connector_fs::scan_documents(&config.scan, root)?;
    let detection = detect(&documents, &config.detect_params())
        .context("Invalid detection parameters")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            let report = MatchReport {
                stats: detection.stats,
                candidates: detection.candidates,
                matches: report::match_views(&documents, &detection.blocks, &detection.matches),
            };
            report::write_json(&mut out, &report)?;
        }
        OutputFormat::Text => {
            if detection.blocks.is_empty() {
                eprintln!("No eligible blocks found.");
                return Ok(());
            }
            if detection.matches.is_empty() {
                writeln!(out, "No near-duplicates found.")?;
                return Ok(());
            }
            let views =
                report::match_views(&documents, &detection.blocks, &detection.matches);
            report::write_matches_text(&mut out, &views, show_full)?;
        }
    }

    Ok(())
}

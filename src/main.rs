//! # proseprint CLI
//!
//! ## Usage
//!
//! ```bash
//! proseprint [--config ./proseprint.toml] [--verbose] <command> <root>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `proseprint find <root>` | Report near-duplicate paragraphs |
//! | `proseprint blocks <root>` | List the paragraphs that qualify for comparison |
//! | `proseprint inspect <root>` | Show the best-scoring pairs, ignoring the threshold |
//! | `proseprint stats <root>` | Show filter counts and bucket distribution |
//!
//! Flags given on the command line override the configuration file.

use clap::{Args, Parser, Subcommand};
use proseprint::config::{self, Config};
use proseprint::inspect::Scope;
use proseprint::report::OutputFormat;
use proseprint::{find, inspect, stats};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// proseprint — find near-duplicate English prose across Markdown files,
/// excluding code.
#[derive(Parser)]
#[command(
    name = "proseprint",
    about = "Find near-duplicate prose passages across Markdown files (excluding code)",
    version,
    long_about = "proseprint splits Markdown documents into heading-scoped paragraphs, drops code \
    and markup, fingerprints each paragraph with SimHash, proposes candidate pairs by LSH banding \
    and confirms them with exact Jaccard similarity over content words."
)]
struct Cli {
    /// Path to a TOML configuration file.
    ///
    /// Optional. Without it, built-in defaults apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline progress to stderr (`RUST_LOG` takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Detection overrides shared by `find` and `stats`.
#[derive(Args)]
struct DetectArgs {
    /// Minimum word count for a paragraph, before and after stop-word removal.
    #[arg(long)]
    min_words: Option<usize>,

    /// Minimum Jaccard similarity to report (0.0–1.0).
    #[arg(long)]
    jaccard: Option<f64>,

    /// Maximum number of matches to report.
    #[arg(long)]
    max_pairs: Option<usize>,

    /// Number of SimHash bands; must divide 64.
    #[arg(long)]
    bands: Option<usize>,

    /// Also report duplicates inside a single file.
    #[arg(long)]
    include_same_file: bool,

    /// Compare every pair of blocks (slow, highest recall).
    #[arg(long)]
    exhaustive: bool,
}

impl DetectArgs {
    fn apply(&self, cfg: &mut Config) {
        if let Some(n) = self.min_words {
            cfg.detection.min_words = n;
        }
        if let Some(j) = self.jaccard {
            cfg.detection.jaccard_threshold = j;
        }
        if let Some(n) = self.max_pairs {
            cfg.detection.max_pairs = n;
        }
        if let Some(n) = self.bands {
            cfg.detection.bands = n;
        }
        if self.include_same_file {
            cfg.detection.same_source_allowed = true;
        }
        if self.exhaustive {
            cfg.detection.exhaustive = true;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Report near-duplicate paragraphs under a directory.
    Find {
        /// Root directory to scan.
        root: PathBuf,

        #[command(flatten)]
        detect: DetectArgs,

        /// Print both passages in full instead of snippets.
        #[arg(long)]
        show_full: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the paragraphs that qualify for comparison.
    Blocks {
        root: PathBuf,

        #[arg(long)]
        min_words: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the highest-scoring pairs regardless of threshold.
    ///
    /// Scores every pair in scope. Use it on a sample corpus to pick a
    /// `--jaccard` value.
    Inspect {
        root: PathBuf,

        /// Number of pairs to show.
        #[arg(long, default_value_t = 10)]
        top: usize,

        #[arg(long, value_enum, default_value_t = Scope::Same)]
        scope: Scope,

        #[arg(long)]
        min_words: Option<usize>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show filter counts and band bucket distribution.
    Stats {
        root: PathBuf,

        #[command(flatten)]
        detect: DetectArgs,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };

    match &cli.command {
        Commands::Find { detect, .. } | Commands::Stats { detect, .. } => detect.apply(&mut cfg),
        Commands::Blocks { min_words, .. } | Commands::Inspect { min_words, .. } => {
            if let Some(n) = min_words {
                cfg.detection.min_words = *n;
            }
        }
    }
    cfg.validate()?;

    match cli.command {
        Commands::Find {
            root,
            show_full,
            format,
            ..
        } => {
            find::run_find(&cfg, &root, format, show_full)?;
        }
        Commands::Blocks { root, format, .. } => {
            inspect::run_blocks(&cfg, &root, format)?;
        }
        Commands::Inspect {
            root,
            top,
            scope,
            format,
            ..
        } => {
            inspect::run_inspect(&cfg, &root, top, scope, format)?;
        }
        Commands::Stats { root, .. } => {
            stats::run_stats(&cfg, &root)?;
        }
    }

    Ok(())
}

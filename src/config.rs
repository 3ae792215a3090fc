//! TOML configuration.
//!
//! Every section and field is optional; a missing file section falls back to
//! the same defaults the CLI uses without `--config`.
//!
//! ```toml
//! [detection]
//! min_words = 20
//! jaccard_threshold = 0.85
//! max_pairs = 200
//! bands = 4
//! bucket_cap = 300
//! same_source_allowed = false
//! exhaustive = false
//!
//! [code_filter]
//! max_non_alpha_ratio = 0.45
//! backtick_limit = 6
//! pipe_limit = 8
//! long_token_chars = 25
//! max_long_token_ratio = 0.12
//! hint_min_alpha_ratio = 0.72
//!
//! [scan]
//! include_globs = ["**/*.md"]
//! exclude_globs = ["drafts/**"]
//! follow_symlinks = false
//! ```

use anyhow::{bail, Context, Result};
use proseprint_core::candidates::DEFAULT_BUCKET_CAP;
use proseprint_core::codelike::CodeFilter;
use proseprint_core::pipeline::DetectParams;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub code_filter: CodeFilter,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectionConfig {
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    #[serde(default = "default_jaccard_threshold")]
    pub jaccard_threshold: f64,
    #[serde(default = "default_max_pairs")]
    pub max_pairs: usize,
    #[serde(default = "default_bands")]
    pub bands: usize,
    #[serde(default = "default_bucket_cap")]
    pub bucket_cap: usize,
    #[serde(default)]
    pub same_source_allowed: bool,
    #[serde(default)]
    pub exhaustive: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            jaccard_threshold: default_jaccard_threshold(),
            max_pairs: default_max_pairs(),
            bands: default_bands(),
            bucket_cap: default_bucket_cap(),
            same_source_allowed: false,
            exhaustive: false,
        }
    }
}

fn default_min_words() -> usize {
    20
}
fn default_jaccard_threshold() -> f64 {
    0.85
}
fn default_max_pairs() -> usize {
    200
}
fn default_bands() -> usize {
    4
}
fn default_bucket_cap() -> usize {
    DEFAULT_BUCKET_CAP
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

impl Config {
    /// Core detection parameters for this configuration.
    pub fn detect_params(&self) -> DetectParams {
        DetectParams {
            min_words: self.detection.min_words,
            jaccard_threshold: self.detection.jaccard_threshold,
            max_pairs: self.detection.max_pairs,
            bands: self.detection.bands,
            bucket_cap: self.detection.bucket_cap,
            same_source_allowed: self.detection.same_source_allowed,
            exhaustive: self.detection.exhaustive,
            code_filter: self.code_filter.clone(),
        }
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.detect_params()
            .validate()
            .context("Invalid [detection] settings")?;

        if self.detection.max_pairs == 0 {
            bail!("detection.max_pairs must be >= 1");
        }
        if self.detection.bucket_cap < 2 {
            bail!("detection.bucket_cap must be >= 2");
        }

        let ratios = [
            ("max_non_alpha_ratio", self.code_filter.max_non_alpha_ratio),
            ("max_long_token_ratio", self.code_filter.max_long_token_ratio),
            ("hint_min_alpha_ratio", self.code_filter.hint_min_alpha_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                bail!("code_filter.{} must be in [0.0, 1.0]", name);
            }
        }

        if self.scan.include_globs.is_empty() {
            bail!("scan.include_globs must not be empty");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

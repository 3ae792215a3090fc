//! Filesystem document source.
//!
//! Walks a root directory, keeps files matching the include globs (and not
//! the exclude globs), and decodes each one as UTF-8, falling back to
//! Latin-1 for files that are not valid UTF-8. Document ids are
//! root-relative paths; the result is sorted by id so runs are
//! reproducible.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use proseprint_core::models::Document;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ScanConfig;

pub fn scan_documents(scan: &ScanConfig, root: &Path) -> Result<Vec<Document>> {
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }

    let include_set = build_globset(&scan.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(scan.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut documents = Vec::new();

    let walker = WalkDir::new(root).follow_links(scan.follow_symlinks);
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        let text = read_text(path)?;
        documents.push(Document::new(rel_str, text));
    }

    documents.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(root = %root.display(), documents = documents.len(), "scanned filesystem");

    Ok(documents)
}

/// Read a file as UTF-8, or as Latin-1 when it is not valid UTF-8.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(path = %path.display(), "not valid UTF-8, decoding as Latin-1");
            Ok(decode_latin1(err.as_bytes()))
        }
    }
}

/// Every byte maps to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guide/deep")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("drafts")).unwrap();
        fs::write(root.join("readme.md"), "# Readme\n").unwrap();
        fs::write(root.join("guide/install.md"), "# Install\n").unwrap();
        fs::write(root.join("guide/deep/notes.md"), "# Notes\n").unwrap();
        fs::write(root.join("guide/notes.txt"), "plain text").unwrap();
        fs::write(root.join("node_modules/pkg/readme.md"), "# Vendored\n").unwrap();
        fs::write(root.join("drafts/wip.md"), "# Draft\n").unwrap();
        tmp
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let tmp = setup();
        let docs = scan_documents(&ScanConfig::default(), tmp.path()).unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["drafts/wip.md", "guide/deep/notes.md", "guide/install.md", "readme.md"]
        );
    }

    #[test]
    fn test_exclude_globs() {
        let tmp = setup();
        let scan = ScanConfig {
            exclude_globs: vec!["drafts/**".to_string()],
            ..ScanConfig::default()
        };
        let docs = scan_documents(&scan, tmp.path()).unwrap();
        assert!(docs.iter().all(|d| !d.id.starts_with("drafts/")));
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn test_include_globs() {
        let tmp = setup();
        let scan = ScanConfig {
            include_globs: vec!["**/*.txt".to_string()],
            ..ScanConfig::default()
        };
        let docs = scan_documents(&scan, tmp.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "plain text");
    }

    #[test]
    fn test_latin1_fallback() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("legacy.md");
        // "café" in Latin-1: the trailing 0xE9 is invalid UTF-8.
        fs::write(&path, [b'c', b'a', b'f', 0xE9]).unwrap();
        assert_eq!(read_text(&path).unwrap(), "café");
    }

    #[test]
    fn test_missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = scan_documents(&ScanConfig::default(), &missing).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }
}

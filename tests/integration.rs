use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const INSTALL_A: &str = "This section explains how to install the package using pip on your \
system, then configure logging, verify the database credentials, restart the worker processes, \
and review the deployment checklist.";

const INSTALL_B: &str = "This section explains how to install the package with pip on your \
machine, then configure logging, verify the database credentials, restart the worker processes, \
and review the deployment checklist.";

const UNRELATED: &str = "Gardeners prune roses during late winter, mulch the tomato beds, water \
seedlings every morning, and harvest pumpkins before the first autumn frost arrives.";

fn proseprint_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("proseprint");
    path
}

fn setup_docs() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("guide")).unwrap();

    fs::write(
        root.join("guide/install.md"),
        format!(
            "# Guide\n\n## Install\n\n{}\n\n```bash\npip install package\n```\n\n{}\n",
            INSTALL_A, UNRELATED
        ),
    )
    .unwrap();
    fs::write(
        root.join("setup.md"),
        format!("# Setup\n\n{}\n", INSTALL_B),
    )
    .unwrap();
    fs::write(root.join("notes.txt"), INSTALL_A).unwrap();

    tmp
}

fn run(args: &[&str]) -> (String, String, bool) {
    let binary = proseprint_binary();
    let output = Command::new(&binary)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run proseprint binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn root_arg(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

#[test]
fn test_find_reports_cross_file_duplicate() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let (stdout, stderr, ok) = run(&["find", &root, "--min-words", "8", "--jaccard", "0.7"]);
    assert!(ok, "find failed: {}", stderr);

    assert!(stdout.contains("Similarity (Jaccard): 0.850"), "{}", stdout);
    assert!(stdout.contains("A: guide/install.md\n   # Guide > ## Install"));
    assert!(stdout.contains("B: setup.md\n   # Setup"));
    assert!(!stdout.contains("pip install package"));
    assert!(!stdout.contains("notes.txt"));
    assert_eq!(stdout.matches("Similarity (Jaccard)").count(), 1);
}

#[test]
fn test_find_json_output() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let (stdout, stderr, ok) = run(&[
        "find",
        &root,
        "--min-words",
        "8",
        "--jaccard",
        "0.7",
        "--format",
        "json",
    ]);
    assert!(ok, "find failed: {}", stderr);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["stats"]["documents"], 2);
    assert_eq!(value["stats"]["blocks"], 3);
    let matches = value["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert!(matches[0]["score"].as_f64().unwrap() >= 0.7);
    assert_eq!(matches[0]["a"]["document"], "guide/install.md");
    assert_eq!(matches[0]["b"]["document"], "setup.md");
}

#[test]
fn test_exhaustive_agrees_on_this_corpus() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let (banded, _, ok1) = run(&["find", &root, "--min-words", "8", "--jaccard", "0.7"]);
    let (exhaustive, _, ok2) = run(&[
        "find",
        &root,
        "--min-words",
        "8",
        "--jaccard",
        "0.7",
        "--exhaustive",
    ]);
    assert!(ok1 && ok2);
    assert_eq!(banded, exhaustive);
}

#[test]
fn test_invalid_bands_fail_fast() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let (stdout, stderr, ok) = run(&["find", &root, "--bands", "5"]);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("bands must evenly divide 64"), "{}", stderr);
}

#[test]
fn test_same_file_duplicates_need_flag() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("repeat.md"),
        format!("# One\n\n{}\n\n# Two\n\n{}\n", INSTALL_A, INSTALL_A),
    )
    .unwrap();
    let root = root_arg(tmp.path());

    let (stdout, _, ok) = run(&["find", &root, "--min-words", "8"]);
    assert!(ok);
    assert!(stdout.contains("No near-duplicates found."));

    let (stdout, _, ok) = run(&["find", &root, "--min-words", "8", "--include-same-file"]);
    assert!(ok);
    assert!(stdout.contains("Similarity (Jaccard): 1.000"));
    assert!(stdout.contains("A: repeat.md\n   # One"));
    assert!(stdout.contains("B: repeat.md\n   # Two"));
}

#[test]
fn test_code_fences_never_match() {
    let tmp = TempDir::new().unwrap();
    let fenced = format!("# Example\n\n```text\n{}\n```\n", INSTALL_A);
    fs::write(tmp.path().join("a.md"), &fenced).unwrap();
    fs::write(tmp.path().join("b.md"), &fenced).unwrap();
    let root = root_arg(tmp.path());

    let (stdout, stderr, ok) = run(&["find", &root, "--min-words", "8"]);
    assert!(ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("No eligible blocks found."));
}

#[test]
fn test_config_file_and_cli_override() {
    let tmp = setup_docs();
    let config_path = tmp.path().join("proseprint.toml");
    fs::write(
        &config_path,
        r#"[detection]
min_words = 8
jaccard_threshold = 0.7

[scan]
include_globs = ["**/*.md", "**/*.txt"]
"#,
    )
    .unwrap();
    let config = root_arg(&config_path);
    let root = root_arg(tmp.path());

    let (stdout, stderr, ok) = run(&["--config", &config, "find", &root]);
    assert!(ok, "find failed: {}", stderr);
    // notes.txt is now scanned and duplicates guide/install.md exactly.
    assert!(stdout.contains("Similarity (Jaccard): 1.000"));
    assert!(stdout.contains("notes.txt"));

    let (stdout, _, ok) = run(&["--config", &config, "find", &root, "--jaccard", "0.95"]);
    assert!(ok);
    assert_eq!(stdout.matches("Similarity (Jaccard)").count(), 1);
    assert!(!stdout.contains("0.850"));
}

#[test]
fn test_bad_config_rejected() {
    let tmp = setup_docs();
    let config_path = tmp.path().join("bad.toml");
    fs::write(&config_path, "[detection]\nbands = 3\n").unwrap();
    let (_, stderr, ok) = run(&[
        "--config",
        &root_arg(&config_path),
        "find",
        &root_arg(tmp.path()),
    ]);
    assert!(!ok);
    assert!(stderr.contains("bands"));
}

#[test]
fn test_missing_root_is_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let (_, stderr, ok) = run(&["find", &root_arg(&missing)]);
    assert!(!ok);
    assert!(stderr.contains("Not a directory"));
}

#[test]
fn test_blocks_lists_prose_only() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let (stdout, stderr, ok) = run(&["blocks", &root, "--min-words", "8", "--format", "json"]);
    assert!(ok, "blocks failed: {}", stderr);

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let blocks = value.as_array().unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0]["heading_path"], "# Guide > ## Install");
    assert_eq!(blocks[0]["fingerprint"].as_str().unwrap().len(), 16);
    for b in blocks {
        assert!(!b["text"].as_str().unwrap().contains("pip install package"));
    }
}

#[test]
fn test_inspect_ranks_cross_file_pairs() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let (stdout, stderr, ok) = run(&[
        "inspect",
        &root,
        "--min-words",
        "8",
        "--scope",
        "cross",
        "--top",
        "1",
    ]);
    assert!(ok, "inspect failed: {}", stderr);
    assert!(stdout.starts_with("1. [0.850]"), "{}", stdout);
    assert!(stdout.contains("guide/install.md #0 <-> setup.md #2"));
}

#[test]
fn test_stats_summary() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let (stdout, stderr, ok) = run(&["stats", &root, "--min-words", "8"]);
    assert!(ok, "stats failed: {}", stderr);
    assert!(stdout.contains("Documents:       2"));
    assert!(stdout.contains("Blocks:          3"));
    assert!(stdout.contains("Bands:           4 × 16 bits"));
}

#[test]
fn test_rerun_output_is_identical() {
    let tmp = setup_docs();
    let root = root_arg(tmp.path());
    let args = [
        "find",
        root.as_str(),
        "--min-words",
        "8",
        "--jaccard",
        "0.1",
        "--include-same-file",
        "--exhaustive",
    ];
    let (first, _, ok1) = run(&args);
    let (second, _, ok2) = run(&args);
    assert!(ok1 && ok2);
    assert_eq!(first, second);
}

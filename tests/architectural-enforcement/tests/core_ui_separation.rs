//! Integration Test: Core/UI Separation
//!
//! The game engine must stay headless: guessdex-core is embedded by the
//! TUI today and should be embeddable by any other surface tomorrow, so no
//! UI-framework code may leak into it. This test walks the core source
//! tree and fails on any reference to the TUI stack.

use std::fs;
use std::path::{Path, PathBuf};

/// Crate names that must never appear in guessdex-core sources.
const FORBIDDEN_IN_CORE: &[&str] = &["ratatui", "crossterm"];

/// Blocking calls that must never appear in production code.
const FORBIDDEN_BLOCKING: &[&str] = &["std::thread::sleep", "reqwest::blocking"];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root must resolve")
}

#[test]
fn test_core_has_no_ui_framework_references() {
    let core_src = workspace_root().join("core/src");
    assert!(core_src.is_dir(), "missing {}", core_src.display());

    let violations = scan(&core_src, FORBIDDEN_IN_CORE);
    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "found {} UI-framework reference(s) in guessdex-core",
            violations.len()
        );
    }
}

#[test]
fn test_no_blocking_sleep_in_production_code() {
    let root = workspace_root();
    let mut violations = Vec::new();
    for dir in ["core/src", "tui/src"] {
        let dir = root.join(dir);
        assert!(dir.is_dir(), "missing {}", dir.display());
        violations.extend(scan(&dir, FORBIDDEN_BLOCKING));
    }

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  {violation}");
        }
        panic!(
            "found {} blocking call(s) in production code; use tokio::time::sleep",
            violations.len()
        );
    }
}

/// Collect `file:line: text` entries for every needle hit under `dir`.
fn scan(dir: &Path, needles: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
    {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let content = fs::read_to_string(entry.path()).expect("source file must be readable");
        for (i, line) in content.lines().enumerate() {
            for needle in needles {
                if line.contains(needle) {
                    violations.push(format!(
                        "{}:{}: {}",
                        entry.path().display(),
                        i + 1,
                        line.trim()
                    ));
                }
            }
        }
    }
    violations
}

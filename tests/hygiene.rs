//! Hygiene — enforces coding standards at test time
//!
//! Scans the viewer binary's production sources. The poll loop must outlive
//! any single bad response, so nothing here may panic, and all output goes
//! through `tracing`.

use std::fs;
use std::path::Path;

fn source_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path_str, content));
            }
        }
    }
}

fn assert_absent(pattern: &str, why: &str) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the workspace root");
    let found: Vec<&str> = files
        .iter()
        .filter(|(_, content)| {
            content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .any(|line| line.contains(pattern))
        })
        .map(|(path, _)| path.as_str())
        .collect();
    assert!(found.is_empty(), "`{pattern}` is not allowed ({why}): {found:?}");
}

#[test]
fn no_unwrap() {
    assert_absent(".unwrap()", "log and keep polling");
}

#[test]
fn no_expect() {
    assert_absent(".expect(", "log and keep polling");
}

#[test]
fn no_panic() {
    assert_absent("panic!(", "a bad response must not stop the viewer");
}

#[test]
fn no_silent_discard() {
    assert_absent("let _ =", "handle or log the result");
}

#[test]
fn no_println() {
    assert_absent("println!(", "use tracing");
}

#[test]
fn no_eprintln() {
    assert_absent("eprintln!(", "use tracing");
}

//! Hygiene — enforces coding standards at test time
//!
//! Scans the canvas crate's production sources for antipatterns. Every allowance
//! is zero: the render path runs on whatever the backend sends, so nothing in
//! it may panic, swallow an error unseen, or print instead of log.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `canvas/src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
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
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file
                .content
                .lines()
                .filter(|line| !line.trim_start().starts_with("//"))
                .filter(|line| line.contains(pattern))
                .count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn assert_absent(pattern: &str, why: &str) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the canvas crate root");
    let found = hits(&files, pattern);
    let listing = found
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(found.is_empty(), "`{pattern}` is not allowed ({why}):\n{listing}");
}

// Panics: these would take down the host page's render loop.

#[test]
fn no_unwrap() {
    assert_absent(".unwrap()", "propagate or skip instead");
}

#[test]
fn no_expect() {
    assert_absent(".expect(", "propagate or skip instead");
}

#[test]
fn no_panic() {
    assert_absent("panic!(", "malformed input must never abort a frame");
}

#[test]
fn no_unreachable() {
    assert_absent("unreachable!(", "model the case instead");
}

#[test]
fn no_todo() {
    assert_absent("todo!(", "every operation must be implemented");
}

#[test]
fn no_unimplemented() {
    assert_absent("unimplemented!(", "every operation must be implemented");
}

// Silent loss — discards errors without inspecting.

#[test]
fn no_silent_discard() {
    assert_absent("let _ =", "handle or return the result");
}

#[test]
fn no_dot_ok() {
    assert_absent(".ok()", "match on the error so the fallback is explicit");
}

// Output goes through the `log` facade so the host decides where it lands.

#[test]
fn no_println() {
    assert_absent("println!(", "use log::debug!/warn!");
}

#[test]
fn no_eprintln() {
    assert_absent("eprintln!(", "use log::warn!");
}

// Style / structure.

#[test]
fn no_allow_dead_code() {
    assert_absent("#[allow(dead_code)]", "delete unused code");
}

#[test]
fn web_sys_only_in_web_module() {
    let files = source_files();
    let outside: Vec<String> = files
        .iter()
        .filter(|f| !f.path.ends_with("web.rs"))
        .filter(|f| f.content.contains("web_sys::"))
        .map(|f| f.path.clone())
        .collect();
    assert!(outside.is_empty(), "web_sys used outside web.rs: {outside:?}");
}

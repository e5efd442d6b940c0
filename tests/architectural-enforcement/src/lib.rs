//! Architectural Enforcement Integration Tests
//!
//! The tests in this package scan the workspace sources and fail on:
//! - sleep calls in production code
//! - blocking I/O inside async functions
//! - terminal crates leaking into the headless core
//!
//! This library holds the source walking shared by those tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Root of the workspace, independent of the test's working directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// One line of production code
#[derive(Debug, Clone)]
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Code with any trailing `//` comment removed
    pub code: String,
    /// Whether the enclosing function is `async`
    pub in_async_fn: bool,
}

impl SourceLine {
    /// `path:line - label: code` for failure reports
    pub fn describe(&self, label: &str) -> String {
        format!(
            "{}:{} - {}: {}",
            self.path.display(),
            self.number,
            label,
            self.code.trim()
        )
    }
}

/// Every `.rs` file under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production lines of every file under `dir`
pub fn production_lines(dir: &str) -> Vec<SourceLine> {
    rust_files(dir)
        .iter()
        .flat_map(|path| match fs::read_to_string(path) {
            Ok(content) => scan_source(path, &content),
            Err(_) => Vec::new(),
        })
        .collect()
}

/// Split `content` into production lines
///
/// Test modules sit at the bottom of each file, so scanning stops at the
/// first `#[cfg(test)]`. Comment lines are dropped.
pub fn scan_source(path: &Path, content: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut in_async_fn = false;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        if trimmed.starts_with("//") {
            continue;
        }

        let code = line.split("//").next().unwrap_or(line);
        if let Some(is_async) = fn_header(code) {
            in_async_fn = is_async;
        } else if trimmed.starts_with("impl ") || trimmed.starts_with("mod ") {
            in_async_fn = false;
        }

        lines.push(SourceLine {
            path: path.to_path_buf(),
            number: idx + 1,
            code: code.to_string(),
            in_async_fn,
        });
    }
    lines
}

/// `Some(is_async)` when the line opens a function
fn fn_header(code: &str) -> Option<bool> {
    let trimmed = code.trim_start();
    let is_fn = trimmed.starts_with("fn ")
        || trimmed.contains(" fn ")
        || trimmed.starts_with("async fn ");
    is_fn.then(|| trimmed.contains("async fn "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<SourceLine> {
        scan_source(Path::new("sample.rs"), text)
    }

    #[test]
    fn test_scan_stops_at_test_module() {
        let lines = scan("fn a() {}\n#[cfg(test)]\nmod tests {\n    fn b() {}\n}\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 1);
    }

    #[test]
    fn test_comments_are_dropped() {
        let lines = scan("// std::thread::sleep\nlet x = 1; // std::fs::read\n");
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].code.contains("std::fs"));
    }

    #[test]
    fn test_async_context_tracking() {
        let lines = scan(
            "pub async fn fetch() {\n    body();\n}\n\nfn load() {\n    read();\n}\n",
        );
        assert!(lines[1].in_async_fn);
        assert!(!lines[5].in_async_fn);
    }
}

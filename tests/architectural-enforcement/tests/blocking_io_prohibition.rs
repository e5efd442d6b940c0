//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async functions MUST NOT use blocking I/O. The schedule and
//! detail documents are fetched with the async `reqwest` client.
//! **Acceptable**: blocking calls in non-async functions, such as reading the
//! config file before the event loop starts.

use architectural_enforcement::{production_lines, SourceLine};

#[test]
fn test_no_blocking_io_in_async_code() {
    let violations = find_blocking_io_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking I/O found in async code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }

        eprintln!("\n❌ FORBIDDEN in async functions:");
        eprintln!("  - std::fs::*");
        eprintln!("  - std::net::*");
        eprintln!("\n❌ FORBIDDEN everywhere:");
        eprintln!("  - reqwest::blocking::*");
        eprintln!("\n✅ ACCEPTABLE:");
        eprintln!("  - Non-async functions (config loading before the runtime is busy)");
        eprintln!("  - Test code");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

fn find_blocking_io_violations() -> Vec<String> {
    let mut violations = Vec::new();
    for dir in ["program/core/src", "tui/src"] {
        for line in production_lines(dir) {
            if let Some(label) = blocking_violation(&line) {
                violations.push(line.describe(label));
            }
        }
    }
    violations
}

fn blocking_violation(line: &SourceLine) -> Option<&'static str> {
    if line.code.contains("reqwest::blocking") {
        return Some("Blocking HTTP client");
    }
    if !line.in_async_fn {
        return None;
    }
    if line.code.contains("std::fs::") {
        return Some("Blocking file I/O in async");
    }
    if line.code.contains("std::net::") {
        return Some("Blocking network I/O in async");
    }
    None
}

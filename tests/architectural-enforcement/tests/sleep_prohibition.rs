//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT sleep to wait for work. Fetch results
//! arrive over channels and terminal input over the event stream.
//! **Exception**: the redraw tick in the TUI event loop (`tui/src/app.rs`).

use architectural_enforcement::{production_lines, SourceLine};

/// Files allowed to use `tokio::time::sleep` as a frame tick
const TICK_FILES: &[&str] = &["tui/src/app.rs"];

#[test]
fn test_no_sleep_in_production_code() {
    let violations = find_sleep_violations();

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }

        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - The redraw tick in the TUI event loop");
        eprintln!("  - Test code");
        eprintln!("\n❌ FORBIDDEN:");
        eprintln!("  - std::thread::sleep anywhere (it blocks a runtime worker)");
        eprintln!("  - Sleep in polling loops or as synchronization");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

fn find_sleep_violations() -> Vec<String> {
    let mut violations = Vec::new();
    for dir in ["program/core/src", "tui/src"] {
        for line in production_lines(dir) {
            if let Some(label) = sleep_violation(&line) {
                violations.push(line.describe(label));
            }
        }
    }
    violations
}

fn sleep_violation(line: &SourceLine) -> Option<&'static str> {
    if line.code.contains("thread::sleep") {
        return Some("Blocking sleep");
    }
    if line.code.contains("time::sleep(") && !is_tick_file(line) {
        return Some("Async sleep outside the frame tick");
    }
    None
}

fn is_tick_file(line: &SourceLine) -> bool {
    let path = line.path.to_string_lossy().replace('\\', "/");
    TICK_FILES.iter().any(|file| path.ends_with(file))
}

//! Integration Test: Headless Core
//!
//! **Policy**: `program-core` knows nothing about terminals. Rendering goes
//! through its `DayRenderer` trait, so another surface can reuse the crate
//! without pulling in ratatui or crossterm.

use std::fs;

use architectural_enforcement::{production_lines, workspace_root};

const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm"];

#[test]
fn test_core_sources_do_not_use_terminal_crates() {
    let violations: Vec<String> = production_lines("program/core/src")
        .into_iter()
        .filter_map(|line| {
            SURFACE_CRATES
                .iter()
                .find(|krate| line.code.contains(&format!("{}::", krate)))
                .map(|krate| line.describe(&format!("Terminal crate `{}` in core", krate)))
        })
        .collect();

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        panic!(
            "\nFound {} terminal import(s) in program-core.\nMove drawing code into the tui crate.",
            violations.len()
        );
    }
}

#[test]
fn test_core_manifest_does_not_depend_on_terminal_crates() {
    let manifest = workspace_root().join("program/core/Cargo.toml");
    let content = fs::read_to_string(&manifest).expect("program-core manifest readable");

    for krate in SURFACE_CRATES {
        let declared = content
            .lines()
            .map(str::trim)
            .any(|line| line.starts_with(&format!("{} ", krate)) || line.starts_with(&format!("{}=", krate)));
        assert!(!declared, "program-core must not depend on {}", krate);
    }
}

#[test]
fn test_core_sources_are_found() {
    // Guards the other checks against scanning an empty directory
    assert!(!production_lines("program/core/src").is_empty());
    assert!(!production_lines("tui/src").is_empty());
}

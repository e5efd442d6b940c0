//! Program TUI - Terminal interface for the conference program
//!
//! This crate draws the program fetched by `program-core` as a full-screen
//! terminal UI: a tab per conference day, the active day laid out for the
//! terminal width, and modal detail panels for sessions and speakers.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering for the detail overlay
//! - **Screen**: Page state and input routing, independent of the terminal
//! - **Views**: Full and compact day renderers, speaker cards, overlay panel
//! - **Widgets**: Day tabs, markdown styling, scrollable text blocks

pub mod app;
pub mod compositor;
pub mod screen;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::App;
pub use screen::{OpenOverlay, Page, ProgramScreen, ScreenLayout};

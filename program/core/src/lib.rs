//! Program Core - Headless Conference Program Logic
//!
//! This crate owns everything about the conference program that is not
//! drawing: fetching the remote schedule document, choosing which day is
//! active, picking a layout for the current viewport and driving the
//! detail overlays. It can drive a TUI, a web front end or run headless
//! in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐   ScheduleDocument   ┌──────────────┐
//! │ScheduleSource │ ───────────────────▶ │ ProgramView  │
//! │ (HTTP / mock) │                      │ Loading      │
//! └───────────────┘                      │ Ready/Error  │
//!         ▲                              └──────┬───────┘
//!         │ Clock (today)                       │ &DaySchedule
//!         │                                     ▼
//! ┌───────┴───────┐                      ┌──────────────┐
//! │ DateResolver  │                      │ DayRenderer  │
//! └───────────────┘                      │ Full/Compact │
//!                                        └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ProgramView`]: schedule lifecycle, tabs and active-day delegation
//! - [`DaySchedule`]: one day of the fetched document, opaque to the core
//! - [`DetailOverlay`]: open/closed state plus generation-tagged content
//! - [`ScrollLock`]: reference-counted lock held while overlays are open
//! - [`ProgramConfig`]: endpoint, day maps, speakers and layout settings
//!
//! # No UI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework, and reads no environment variables.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod date;
pub mod day_maps;
pub mod error;
pub mod layout;
pub mod messages;
pub mod overlay;
pub mod program;
pub mod schedule;
pub mod selection;
pub mod speakers;

pub use client::{DetailFetcher, HttpDetailFetcher, HttpScheduleClient, ScheduleSource};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, ProgramConfig, ProgramToml, DEFAULT_SCHEDULE_URL,
};
pub use date::{date_string, today_string, Clock, FixedClock, SystemClock};
pub use day_maps::{DayTitleMap, NoEventsMap};
pub use error::FetchError;
pub use layout::{DayContext, DayRenderer, LayoutKind, Viewport};
pub use messages::{MountId, OverlayId, ProgramMessage};
pub use overlay::{
    ClickOutcome, ClickTarget, DetailContent, DetailOverlay, DetailRequest, ScrollLock,
    ScrollLockGuard,
};
pub use program::{DayTab, ProgramPhase, ProgramView, SCHEDULE_ERROR_MESSAGE};
pub use schedule::{DaySchedule, ScheduleDocument};
pub use selection::{initial_index, DayIndexSelector};
pub use speakers::{Speaker, SpeakerCard};

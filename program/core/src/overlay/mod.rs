//! Detail Overlays
//!
//! Modal panels that show long-form content (speaker biographies, session
//! abstracts) on demand.
//!
//! - [`DetailOverlay`]: open/closed state, click routing and content
//! - [`ScrollLock`]: page scroll suppression shared by all overlays

mod detail;
mod scroll_lock;

pub use detail::{ClickOutcome, ClickTarget, DetailContent, DetailOverlay, DetailRequest};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};

//! Layout Selection
//!
//! The program has two day renderers: a full layout for wide viewports and a
//! compact one for narrow viewports. Exactly one of them is invoked per
//! render, chosen from an explicit [`LayoutKind`] so the choice is testable
//! without a drawing surface.

use crate::schedule::DaySchedule;

/// Default width (terminal columns) below which the compact layout is used
pub const DEFAULT_COMPACT_BREAKPOINT: u16 = 100;

/// Which day renderer to use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Side-by-side rooms for wide viewports
    Full,
    /// Single chronological list for narrow viewports
    Compact,
}

/// Size of the drawing area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Width in columns
    pub width: u16,
    /// Height in rows
    pub height: u16,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Pick the layout for this viewport
    pub fn classify(&self, compact_breakpoint: u16) -> LayoutKind {
        if self.width < compact_breakpoint {
            LayoutKind::Compact
        } else {
            LayoutKind::Full
        }
    }
}

/// Per-day data resolved from the day maps, handed to renderers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayContext<'a> {
    /// Day date (`YYYY-MM-DD`)
    pub date: &'a str,
    /// Tab label from the day-title map
    pub title: Option<&'a str>,
    /// Markdown shown when the day has no sessions
    pub no_events: Option<&'a str>,
}

/// A renderer for one day of the schedule
///
/// Renderers receive the day by reference for a single pass and must not
/// retain it. The drawing target is renderer-defined.
pub trait DayRenderer {
    /// Where the renderer draws
    type Surface: ?Sized;

    /// Lay out `day` on `surface`
    fn render_day(&self, day: &DaySchedule, ctx: &DayContext<'_>, surface: &mut Self::Surface);
}

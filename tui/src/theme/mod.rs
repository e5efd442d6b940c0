//! Theme and Colors
//!
//! The program palette: a dark page, a navy accent for the active day, and
//! a slate panel for detail overlays.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Page Colors
// ============================================================================

/// Active tab underline / accent - deep navy-blue
pub const ACCENT: Color = Color::Rgb(96, 140, 230);

/// Regular text
pub const TEXT: Color = Color::Rgb(220, 220, 220);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(110, 110, 110);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(200, 60, 60);

/// Session time column
pub const TIME_AMBER: Color = Color::Rgb(230, 190, 110);

/// Room headers
pub const ROOM_TEAL: Color = Color::Rgb(110, 200, 190);

/// Speaker names
pub const SPEAKER_GREEN: Color = Color::Rgb(130, 210, 140);

/// Cursor row background
pub const CURSOR_BG: Color = Color::Rgb(45, 55, 80);

// ============================================================================
// Overlay Colors
// ============================================================================

/// Dimmed page behind an open overlay
pub const BACKDROP_BG: Color = Color::Rgb(30, 30, 30);

/// Detail panel background
pub const PANEL_BG: Color = Color::Rgb(24, 28, 38);

/// Speaker biography text
pub const BIO_GRAY: Color = Color::Rgb(229, 231, 235);

/// Markdown links
pub const LINK_BLUE: Color = Color::Rgb(100, 160, 255);

// ============================================================================
// Styles
// ============================================================================

/// Style of the active day tab
pub fn active_tab() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        .underline_color(ACCENT)
}

/// Style of inactive day tabs
pub fn inactive_tab() -> Style {
    Style::default().fg(DIM_GRAY)
}

/// Style of panel body text
pub fn panel_text() -> Style {
    Style::default().fg(TEXT).bg(PANEL_BG)
}

/// Paragraph style of speaker biographies
pub fn speaker_bio() -> Style {
    Style::default().fg(BIO_GRAY)
}

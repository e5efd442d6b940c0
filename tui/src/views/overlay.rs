//! Detail Overlay Panel
//!
//! Draws an open [`DetailOverlay`] as a modal panel over a solid backdrop.
//! [`OverlayGeometry`] is the single source of truth for where the panel,
//! its close controls and the backdrop are, so clicks are routed against
//! exactly what was drawn.

use program_core::{ClickTarget, DetailOverlay};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, StatefulWidget, Widget};

use crate::theme;
use crate::widgets::{render_markdown, MarkdownStyles, TextBlock, TextBlockState};

/// Widest the panel gets
const MAX_PANEL_WIDTH: u16 = 84;

/// Close button label
const CLOSE_LABEL: &str = "[ Close ]";

/// Corner close label
const CORNER_LABEL: &str = "[x]";

/// Shown while a remote document is loading
const LOADING_TEXT: &str = "Loading…";

/// Screen regions of the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayGeometry {
    /// Whole overlay (backdrop included)
    pub area: Rect,
    /// Bordered panel
    pub panel: Rect,
    /// Scrollable text inside the panel
    pub content: Rect,
    /// Corner close control (on the top border)
    pub corner_close: Rect,
    /// Close button under the content
    pub close_button: Rect,
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

impl OverlayGeometry {
    /// Lay the overlay out over `area`
    pub fn for_area(area: Rect) -> Self {
        let width = area.width.saturating_sub(4).min(MAX_PANEL_WIDTH);
        let height = area.height.saturating_sub(2);
        let panel = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        // Inside the border: content, a spacer row, the button row
        let inner_x = panel.x + 2u16.min(panel.width);
        let inner_w = panel.width.saturating_sub(4);
        let content = Rect::new(
            inner_x,
            panel.y + 1u16.min(panel.height),
            inner_w,
            panel.height.saturating_sub(4),
        );

        let close_w = (CLOSE_LABEL.len() as u16).min(panel.width);
        let close_button = Rect::new(
            panel.x + (panel.width - close_w) / 2,
            (panel.y + panel.height).saturating_sub(2),
            close_w,
            1,
        );

        let corner_w = (CORNER_LABEL.len() as u16).min(panel.width);
        let corner_close = Rect::new(
            (panel.x + panel.width).saturating_sub(corner_w + 1),
            panel.y,
            corner_w,
            1,
        );

        Self {
            area,
            panel,
            content,
            corner_close,
            close_button,
        }
    }

    /// Which overlay element is under (x, y)
    pub fn target_at(&self, x: u16, y: u16) -> ClickTarget {
        if contains(self.corner_close, x, y) {
            ClickTarget::CornerClose
        } else if contains(self.close_button, x, y) {
            ClickTarget::CloseButton
        } else if contains(self.panel, x, y) {
            ClickTarget::Panel
        } else {
            ClickTarget::Backdrop
        }
    }

    /// Largest useful panel scroll for `overlay`
    pub fn max_scroll(&self, overlay: &DetailOverlay) -> u16 {
        let total = panel_lines(overlay, self.content.width, &MarkdownStyles::default()).len();
        u16::try_from(total.saturating_sub(self.content.height as usize)).unwrap_or(u16::MAX)
    }
}

/// Styled panel text for `overlay`
///
/// A loading line while its fetch is outstanding; nothing at all when the
/// content is empty and no fetch is pending (e.g. after a failed fetch).
pub fn panel_lines(
    overlay: &DetailOverlay,
    width: u16,
    styles: &MarkdownStyles,
) -> Vec<Line<'static>> {
    let content = overlay.content();
    if content.trim().is_empty() {
        if overlay.is_loading() {
            return vec![Line::styled(
                LOADING_TEXT,
                Style::default().fg(theme::DIM_GRAY),
            )];
        }
        return Vec::new();
    }
    render_markdown(content, width as usize, styles)
}

/// Modal panel widget for one open overlay
pub struct OverlayPanel<'a> {
    overlay: &'a DetailOverlay,
    title: &'a str,
    styles: MarkdownStyles,
}

impl<'a> OverlayPanel<'a> {
    /// Panel for `overlay`, titled `title`
    pub fn new(overlay: &'a DetailOverlay, title: &'a str) -> Self {
        Self {
            overlay,
            title,
            styles: MarkdownStyles::default(),
        }
    }

    /// Markdown styles for the panel text
    pub fn styles(mut self, styles: MarkdownStyles) -> Self {
        self.styles = styles;
        self
    }
}

impl Widget for OverlayPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = OverlayGeometry::for_area(area);

        buf.set_style(area, Style::default().bg(theme::BACKDROP_BG));
        Clear.render(geometry.panel, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(format!(" {} ", self.title))
            .style(theme::panel_text());
        block.render(geometry.panel, buf);

        buf.set_string(
            geometry.corner_close.x,
            geometry.corner_close.y,
            CORNER_LABEL,
            Style::default().fg(theme::TEXT).bg(theme::PANEL_BG),
        );

        let lines = panel_lines(self.overlay, geometry.content.width, &self.styles);
        let mut state = TextBlockState::at(self.overlay.panel_scroll() as usize);
        TextBlock::new(&lines)
            .style(theme::panel_text())
            .render(geometry.content, buf, &mut state);

        buf.set_string(
            geometry.close_button.x,
            geometry.close_button.y,
            CLOSE_LABEL,
            Style::default()
                .fg(theme::ACCENT)
                .bg(theme::PANEL_BG)
                .add_modifier(Modifier::BOLD),
        );
    }
}

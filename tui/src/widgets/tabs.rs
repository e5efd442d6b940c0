//! Day Tab Bar
//!
//! One tab per fetched day. Tab geometry comes from [`tab_rects`] so the
//! renderer and mouse hit-testing always agree on where each tab is.

use program_core::DayTab;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use crate::theme;

/// Narrowest tab; unlabeled days still get something to click
const MIN_TAB_WIDTH: u16 = 4;

/// Columns between tabs
const TAB_GAP: u16 = 1;

fn natural_width(tab: &DayTab<'_>) -> u16 {
    let label = tab.label.map_or(0, UnicodeWidthStr::width);
    u16::try_from(label + 2)
        .unwrap_or(u16::MAX)
        .max(MIN_TAB_WIDTH)
}

/// Screen rectangles of each tab inside `area` (single row)
///
/// Tabs keep their natural width when they fit; otherwise the row is split
/// evenly and labels are truncated.
pub fn tab_rects(tabs: &[DayTab<'_>], area: Rect) -> Vec<Rect> {
    if tabs.is_empty() || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let count = u16::try_from(tabs.len()).unwrap_or(u16::MAX);
    let gaps = TAB_GAP.saturating_mul(count - 1);
    let natural: u32 = tabs.iter().map(|t| u32::from(natural_width(t))).sum();
    let fits = natural + u32::from(gaps) <= u32::from(area.width);
    let even = (area.width.saturating_sub(gaps) / count).max(1);

    let mut x = area.x;
    let right = area.x.saturating_add(area.width);
    let mut rects = Vec::with_capacity(tabs.len());
    for tab in tabs {
        let width = if fits { natural_width(tab) } else { even };
        let width = width.min(right.saturating_sub(x));
        rects.push(Rect::new(x, area.y, width, 1));
        x = x.saturating_add(width).saturating_add(TAB_GAP).min(right);
    }
    rects
}

/// Index of the tab under screen position (x, y)
pub fn tab_at(rects: &[Rect], x: u16, y: u16) -> Option<usize> {
    rects.iter().position(|r| {
        r.width > 0 && x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
    })
}

/// The day tab bar widget
pub struct DayTabs<'a> {
    tabs: &'a [DayTab<'a>],
}

impl<'a> DayTabs<'a> {
    /// Tab bar over `tabs`
    pub fn new(tabs: &'a [DayTab<'a>]) -> Self {
        Self { tabs }
    }
}

impl Widget for DayTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (tab, rect) in self.tabs.iter().zip(tab_rects(self.tabs, area)) {
            let style = if tab.active {
                theme::active_tab()
            } else {
                theme::inactive_tab()
            };
            buf.set_style(rect, style);
            if let Some(label) = tab.label {
                let inner = rect.width.saturating_sub(2);
                buf.set_stringn(rect.x + 1, rect.y, label, inner as usize, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tab(index: usize, label: Option<&'static str>, active: bool) -> DayTab<'static> {
        DayTab {
            index,
            date: "2024-11-05",
            label,
            active,
        }
    }

    #[test]
    fn test_natural_widths_when_they_fit() {
        let tabs = [tab(0, Some("Tue"), true), tab(1, None, false)];
        let rects = tab_rects(&tabs, Rect::new(2, 1, 40, 1));
        assert_eq!(rects, vec![Rect::new(2, 1, 5, 1), Rect::new(8, 1, 4, 1)]);
    }

    #[test]
    fn test_even_split_when_too_wide() {
        let tabs = [
            tab(0, Some("Wednesday 6th (Conference)"), false),
            tab(1, Some("Thursday 7th (Conference)"), true),
        ];
        let rects = tab_rects(&tabs, Rect::new(0, 0, 21, 1));
        assert_eq!(rects, vec![Rect::new(0, 0, 10, 1), Rect::new(11, 0, 10, 1)]);
    }

    #[test]
    fn test_hit_testing() {
        let rects = vec![Rect::new(0, 1, 5, 1), Rect::new(6, 1, 5, 1)];
        assert_eq!(tab_at(&rects, 3, 1), Some(0));
        assert_eq!(tab_at(&rects, 5, 1), None);
        assert_eq!(tab_at(&rects, 7, 1), Some(1));
        assert_eq!(tab_at(&rects, 7, 0), None);
    }

    #[test]
    fn test_render_labels_and_blank_tab() {
        let tabs = [tab(0, Some("Tue"), true), tab(1, None, false)];
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 1));
        DayTabs::new(&tabs).render(buf.area, &mut buf);

        assert_eq!(buf[(1, 0)].symbol(), "T");
        assert_eq!(buf[(1, 0)].style().fg, theme::active_tab().fg);
        assert_eq!(buf[(7, 0)].symbol(), " ");
    }
}

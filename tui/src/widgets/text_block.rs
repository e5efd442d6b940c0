//! TextBlock Widget
//!
//! A borderless, scrollable region of pre-styled lines. Detail panels and
//! the speakers page both scroll through one of these.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;

/// State for a scrollable text block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBlockState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total content lines (set on render)
    pub total_lines: usize,
}

impl TextBlockState {
    /// Start at a given offset
    pub fn at(scroll_offset: usize) -> Self {
        Self {
            scroll_offset,
            total_lines: 0,
        }
    }

    /// Largest useful offset for a region `height` rows tall
    pub fn max_scroll(&self, height: u16) -> usize {
        self.total_lines.saturating_sub(height as usize)
    }
}

/// A borderless, scrollable block of styled lines
pub struct TextBlock<'a> {
    lines: &'a [Line<'static>],
    style: Style,
}

impl<'a> TextBlock<'a> {
    /// Wrap already-styled lines
    pub fn new(lines: &'a [Line<'static>]) -> Self {
        Self {
            lines,
            style: Style::default(),
        }
    }

    /// Base style painted under the text (fills the whole area)
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl StatefulWidget for TextBlock<'_> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, self.style);

        state.total_lines = self.lines.len();

        // Clamp scroll
        let max_scroll = state.max_scroll(area.height);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        // Render visible lines
        for (i, line) in self
            .lines
            .iter()
            .skip(state.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}

/// Wrap plain text into lines of one style
///
/// Embedded newlines start new lines; empty lines are kept.
pub fn wrap_plain(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    let width = width.max(1);
    text.lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![Line::default()]
            } else {
                wrap(line, width)
                    .into_iter()
                    .map(|cow| Line::styled(cow.into_owned(), style))
                    .collect()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_renders_from_offset_and_clamps() {
        let lines: Vec<Line<'static>> = ["a", "b", "c", "d"]
            .iter()
            .map(|s| Line::raw(*s))
            .collect();
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 2));
        let mut state = TextBlockState::at(10);

        TextBlock::new(&lines).render(buf.area, &mut buf, &mut state);

        assert_eq!(state.total_lines, 4);
        assert_eq!(state.scroll_offset, 2);
        assert_eq!(row(&buf, 0), "c");
        assert_eq!(row(&buf, 1), "d");
    }

    #[test]
    fn test_wrap_plain_keeps_paragraph_breaks() {
        let lines = wrap_plain("alpha beta gamma\n\ndelta", 11, Style::default());
        let text: Vec<String> = lines.iter().map(ToString::to_string).collect();
        assert_eq!(text, vec!["alpha beta", "gamma", "", "delta"]);
    }
}

//! Full Day View
//!
//! Wide layout: one column per room, sessions stacked under their room.

use program_core::{DayContext, DayRenderer, DaySchedule};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{draw_no_events, draw_rows, heading, session_rows, DaySessions, FrameState, Row};
use crate::theme;

/// Rows above the scrolling columns: heading, gap, room names, rule
const HEADER_ROWS: u16 = 4;

/// Room-per-column renderer
#[derive(Debug, Default)]
pub struct FullDayView {
    frame: FrameState,
}

impl FullDayView {
    /// Renderer for one frame
    pub fn new(frame: FrameState) -> Self {
        Self { frame }
    }

    /// Finish the frame and hand back its state
    pub fn into_frame(self) -> FrameState {
        self.frame
    }
}

impl DayRenderer for FullDayView {
    type Surface = Buffer;

    fn render_day(&self, day: &DaySchedule, ctx: &DayContext<'_>, buf: &mut Buffer) {
        let area = buf.area;
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &heading(ctx), area.width);

        let body = Rect::new(
            area.x,
            area.y + 2u16.min(area.height),
            area.width,
            area.height.saturating_sub(2),
        );
        let sessions = DaySessions::from_day(day);
        if sessions.is_empty() {
            draw_no_events(buf, body, ctx, &self.frame);
            return;
        }

        let rooms = sessions.by_room();
        let count = u16::try_from(rooms.len()).unwrap_or(u16::MAX).max(1);
        let gaps = count - 1;
        let col_width = (area.width.saturating_sub(gaps) / count).max(1);
        let content_height = area.height.saturating_sub(HEADER_ROWS);

        let mut tallest = 0usize;
        for (i, (room, list)) in rooms.iter().enumerate() {
            let x = area.x + (col_width + 1) * i as u16;
            if x >= area.x + area.width {
                break;
            }
            let width = col_width.min(area.x + area.width - x);

            let room_style = Style::default()
                .fg(theme::ROOM_TEAL)
                .add_modifier(Modifier::BOLD);
            if area.height > 2 {
                buf.set_stringn(x, area.y + 2, *room, width as usize, room_style);
            }
            if area.height > 3 {
                let rule = "─".repeat(width as usize);
                buf.set_string(x, area.y + 3, rule, Style::default().fg(theme::DIM_GRAY));
            }

            let rows: Vec<Row> = list
                .iter()
                .flat_map(|s| {
                    let highlight = self.frame.cursor == Some(s.ordinal);
                    session_rows(s, width as usize, highlight, false)
                })
                .collect();
            tallest = tallest.max(rows.len());

            let column = Rect::new(x, area.y + HEADER_ROWS, width, content_height);
            if content_height > 0 {
                draw_rows(buf, column, &rows, self.frame.scroll, &self.frame);
            }
        }

        self.frame.record(|r| {
            r.content_rows = tallest;
            r.visible_rows = content_height;
        });
    }
}

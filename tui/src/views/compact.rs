//! Compact Day View
//!
//! Narrow layout: every session in one chronological list, each tagged
//! with its room.

use program_core::{DayContext, DayRenderer, DaySchedule};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::{draw_no_events, draw_rows, heading, session_rows, DaySessions, FrameState, Row};

/// Chronological single-column renderer
#[derive(Debug, Default)]
pub struct CompactDayView {
    frame: FrameState,
}

impl CompactDayView {
    /// Renderer for one frame
    pub fn new(frame: FrameState) -> Self {
        Self { frame }
    }

    /// Finish the frame and hand back its state
    pub fn into_frame(self) -> FrameState {
        self.frame
    }
}

impl DayRenderer for CompactDayView {
    type Surface = Buffer;

    fn render_day(&self, day: &DaySchedule, ctx: &DayContext<'_>, buf: &mut Buffer) {
        let area = buf.area;
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &heading(ctx), area.width);

        let list = Rect::new(
            area.x,
            area.y + 2u16.min(area.height),
            area.width,
            area.height.saturating_sub(2),
        );
        let sessions = DaySessions::from_day(day);
        if sessions.is_empty() {
            draw_no_events(buf, list, ctx, &self.frame);
            return;
        }

        let rows: Vec<Row> = sessions
            .chronological()
            .iter()
            .flat_map(|s| {
                let highlight = self.frame.cursor == Some(s.ordinal);
                session_rows(s, list.width as usize, highlight, true)
            })
            .collect();
        draw_rows(buf, list, &rows, self.frame.scroll, &self.frame);

        self.frame.record(|r| {
            r.content_rows = rows.len();
            r.visible_rows = list.height;
        });
    }
}

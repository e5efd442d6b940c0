//! Day Renderers and Page Views
//!
//! [`FullDayView`] and [`CompactDayView`] implement the core's
//! `DayRenderer` trait over a ratatui [`Buffer`]. A renderer is built for a
//! single frame: it carries the page scroll and session cursor in, and the
//! clickable session rows and content height out.
//!
//! [`Buffer`]: ratatui::buffer::Buffer

pub mod compact;
pub mod full;
pub mod overlay;
pub mod sessions;
pub mod speakers;

use std::cell::RefCell;

use program_core::DayContext;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::StatefulWidget;

use crate::theme;
use crate::widgets::{render_markdown, wrap_plain, MarkdownStyles, TextBlock, TextBlockState};

pub use compact::CompactDayView;
pub use full::FullDayView;
pub use sessions::{DaySessions, Session};

/// Text shown for an empty day with no configured fallback
pub const GENERIC_NO_EVENTS: &str = "No events today";

/// A clickable screen row and the item (session or card) it belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowHit {
    /// Row rectangle, in body-local coordinates
    pub rect: Rect,
    /// Session ordinal or speaker index
    pub ordinal: usize,
}

/// What a renderer learned while drawing
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Clickable session rows
    pub hits: Vec<RowHit>,
    /// Rows of scrollable content (for clamping the page scroll)
    pub content_rows: usize,
    /// Rows available for scrollable content
    pub visible_rows: u16,
}

/// Frame-local inputs and outputs shared by both day renderers
#[derive(Debug, Default)]
pub struct FrameState {
    /// Page scroll offset
    pub scroll: u16,
    /// Highlighted session ordinal
    pub cursor: Option<usize>,
    report: RefCell<RenderReport>,
}

impl FrameState {
    /// State for one frame
    pub fn new(scroll: u16, cursor: Option<usize>) -> Self {
        Self {
            scroll,
            cursor,
            report: RefCell::new(RenderReport::default()),
        }
    }

    /// Take what the renderer recorded
    pub fn into_report(self) -> RenderReport {
        self.report.into_inner()
    }

    fn record(&self, f: impl FnOnce(&mut RenderReport)) {
        f(&mut self.report.borrow_mut());
    }
}

/// One drawn row of a session or card list
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Row {
    line: Line<'static>,
    item: Option<usize>,
    highlight: bool,
}

impl Row {
    fn blank() -> Self {
        Self {
            line: Line::default(),
            item: None,
            highlight: false,
        }
    }
}

/// Rows for one session block: time line, title, speakers, spacer
pub(crate) fn session_rows(
    session: &Session,
    width: usize,
    highlight: bool,
    show_room: bool,
) -> Vec<Row> {
    let mut lines = Vec::new();

    let mut when = vec![Span::styled(
        session.start.clone(),
        Style::default().fg(theme::TIME_AMBER),
    )];
    if !session.duration.is_empty() {
        when.push(Span::styled(
            format!(" ({})", session.duration),
            Style::default().fg(theme::DIM_GRAY),
        ));
    }
    if show_room && !session.room.is_empty() {
        when.push(Span::styled(
            format!("  {}", session.room),
            Style::default().fg(theme::ROOM_TEAL),
        ));
    }
    lines.push(Line::from(when));

    let title_style = Style::default()
        .fg(theme::TEXT)
        .add_modifier(Modifier::BOLD);
    lines.extend(wrap_plain(&session.title, width, title_style));

    if !session.speakers.is_empty() {
        let style = Style::default().fg(theme::SPEAKER_GREEN);
        lines.extend(wrap_plain(&session.speaker_line(), width, style));
    }

    let mut rows: Vec<Row> = lines
        .into_iter()
        .map(|line| Row {
            line,
            item: Some(session.ordinal),
            highlight,
        })
        .collect();
    rows.push(Row::blank());
    rows
}

/// Draw `rows` into `area` starting at `scroll`, recording session hits
pub(crate) fn draw_rows(buf: &mut Buffer, area: Rect, rows: &[Row], scroll: u16, frame: &FrameState) {
    let visible = rows
        .iter()
        .skip(scroll as usize)
        .take(area.height as usize);
    for (i, row) in visible.enumerate() {
        let y = area.y + i as u16;
        let rect = Rect::new(area.x, y, area.width, 1);
        if row.highlight {
            buf.set_style(rect, Style::default().bg(theme::CURSOR_BG));
        }
        buf.set_line(area.x, y, &row.line, area.width);
        if let Some(ordinal) = row.item {
            frame.record(|r| r.hits.push(RowHit { rect, ordinal }));
        }
    }
}

/// Day heading: label when mapped, then the date
pub(crate) fn heading(ctx: &DayContext<'_>) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(title) = ctx.title {
        spans.push(Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        ctx.date.to_string(),
        Style::default().fg(theme::DIM_GRAY),
    ));
    Line::from(spans)
}

/// Fallback for a day without sessions
pub(crate) fn draw_no_events(buf: &mut Buffer, area: Rect, ctx: &DayContext<'_>, frame: &FrameState) {
    let text = ctx.no_events.unwrap_or(GENERIC_NO_EVENTS);
    let lines = render_markdown(text, area.width as usize, &MarkdownStyles::default());
    let mut state = TextBlockState::at(frame.scroll as usize);
    TextBlock::new(&lines).render(area, buf, &mut state);
    frame.record(|r| {
        r.content_rows = state.total_lines;
        r.visible_rows = area.height;
    });
}

#[cfg(test)]
pub(crate) mod test_support {
    use program_core::DaySchedule;
    use ratatui::buffer::Buffer;
    use serde_json::{json, Value};

    /// A two-room day
    pub fn conference_day() -> DaySchedule {
        let fields = json!({
            "rooms": {
                "Main Hall": [
                    {"start": "09:00", "duration": "00:30", "title": "Opening",
                     "persons": [{"public_name": "Ana"}]},
                    {"start": "10:00", "duration": "00:30", "title": "Tiles",
                     "persons": []}
                ],
                "Room 2": [
                    {"start": "09:30", "duration": "00:30", "title": "QGIS",
                     "persons": [{"public_name": "Cy"}]}
                ]
            }
        });
        match fields {
            Value::Object(map) => DaySchedule::new("2024-11-06", map),
            _ => unreachable!(),
        }
    }

    /// All text of a buffer, one string per row
    pub fn rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }
}

//! Program Screen
//!
//! All state of the program page that is not the terminal itself: the
//! schedule view, the session cursor, page scroll, speaker cards and the
//! detail overlays. Input arrives as crossterm events, fetch results as
//! [`ProgramMessage`]s; fetches the screen needs are queued and handed to
//! the app with [`ProgramScreen::take_requests`].
//!
//! # Regions
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ Conference title               [i] About   │  header
//! │ [Tue 5th] [Wed 6th] [Thu 7th] [Fri 8th]    │
//! │ ────────────────────────────────────────── │
//! ├────────────────────────────────────────────┤
//! │ active day (full or compact renderer)      │  body
//! ├────────────────────────────────────────────┤
//! │ key hints                                  │  status
//! └────────────────────────────────────────────┘
//! ```
//!
//! At most one overlay is open at a time; while one is open the page does
//! not scroll and input goes to the overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use program_core::{
    today_string, ClickOutcome, ClickTarget, Clock, DetailContent, DetailOverlay, DetailRequest,
    LayoutKind, MountId, OverlayId, ProgramConfig, ProgramMessage, ProgramPhase, ProgramView,
    ScrollLock, SpeakerCard, Viewport,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme;
use crate::views::overlay::{OverlayGeometry, OverlayPanel};
use crate::views::speakers::SpeakersView;
use crate::views::{CompactDayView, DaySessions, FrameState, FullDayView, RenderReport};
use crate::widgets::{tab_at, tab_rects, DayTabs, MarkdownStyles};

/// Rows taken by the header (title, tabs, rule)
pub const HEADER_HEIGHT: u16 = 3;

/// Rows scrolled per mouse wheel notch
const WHEEL_STEP: i32 = 3;

/// Header control that opens the preamble
const ABOUT_LABEL: &str = "[i] About";

/// Title of the preamble panel
const ABOUT_TITLE: &str = "About the program";

/// Screen regions for a terminal size
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Whole terminal
    pub area: Rect,
    /// Title, day tabs and rule
    pub header: Rect,
    /// Active page
    pub body: Rect,
    /// Key hints
    pub status: Rect,
}

impl ScreenLayout {
    /// Split `area` into regions
    pub fn for_area(area: Rect) -> Self {
        let header_h = HEADER_HEIGHT.min(area.height);
        let status_h = 1u16.min(area.height - header_h);
        let body_h = area.height - header_h - status_h;
        Self {
            area,
            header: Rect::new(area.x, area.y, area.width, header_h),
            body: Rect::new(area.x, area.y + header_h, area.width, body_h),
            status: Rect::new(area.x, area.y + header_h + body_h, area.width, status_h),
        }
    }
}

/// Which page the body shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// The day-by-day program
    Program,
    /// Featured speaker cards
    Speakers,
}

/// The overlay currently open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenOverlay {
    /// Session details
    Session,
    /// The program preamble
    Preamble,
    /// Biography of speaker card `n`
    Speaker(usize),
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn offset(value: u16, delta: i32, max: usize) -> u16 {
    let max = i64::try_from(max).unwrap_or(i64::MAX);
    let next = (i64::from(value) + i64::from(delta)).clamp(0, max.max(0));
    u16::try_from(next).unwrap_or(u16::MAX)
}

/// State of the program page
pub struct ProgramScreen {
    program: ProgramView,
    clock: Box<dyn Clock>,
    compact_breakpoint: u16,
    area: Rect,
    running: bool,

    /// Shared by every overlay; the page scrolls only while it is free
    scroll_lock: ScrollLock,
    page: Page,

    program_scroll: u16,
    program_report: RenderReport,
    session_cursor: usize,
    session_overlay: DetailOverlay,
    session_title: String,

    preamble: Option<DetailOverlay>,

    speakers: Vec<SpeakerCard>,
    speaker_cursor: usize,
    speakers_scroll: u16,
    speakers_report: RenderReport,

    pending: Vec<DetailRequest>,
}

impl ProgramScreen {
    /// Mount the program page
    ///
    /// Speaker biographies and the preamble are requested right away; the
    /// schedule fetch is the caller's, keyed by [`ProgramScreen::mount`].
    pub fn new(config: &ProgramConfig, clock: Box<dyn Clock>, area: Rect) -> Self {
        let scroll_lock = ScrollLock::new();
        let mut pending = Vec::new();

        let speakers = config
            .speakers
            .iter()
            .cloned()
            .map(|speaker| {
                let (card, request) = SpeakerCard::mount(speaker, scroll_lock.clone());
                pending.extend(request);
                card
            })
            .collect();

        let preamble = config.preamble_url.as_ref().map(|url| {
            let mut overlay = DetailOverlay::new(scroll_lock.clone());
            pending.extend(overlay.set_source(DetailContent::Remote(url.clone())));
            overlay
        });

        Self {
            program: ProgramView::new(config.day_titles.clone(), config.no_events.clone()),
            clock,
            compact_breakpoint: config.compact_breakpoint,
            area,
            running: true,
            session_overlay: DetailOverlay::new(scroll_lock.clone()),
            scroll_lock,
            page: Page::Program,
            program_scroll: 0,
            program_report: RenderReport::default(),
            session_cursor: 0,
            session_title: String::new(),
            preamble,
            speakers,
            speaker_cursor: 0,
            speakers_scroll: 0,
            speakers_report: RenderReport::default(),
            pending,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Schedule state
    pub fn program(&self) -> &ProgramView {
        &self.program
    }

    /// Mount id the schedule fetch must carry
    pub fn mount(&self) -> MountId {
        self.program.mount()
    }

    /// Whether the app should keep running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Page shown in the body
    pub fn page(&self) -> Page {
        self.page
    }

    /// Page scroll lock shared by the overlays
    pub fn scroll_lock(&self) -> &ScrollLock {
        &self.scroll_lock
    }

    /// Program page scroll offset
    pub fn program_scroll(&self) -> u16 {
        self.program_scroll
    }

    /// Highlighted session ordinal on the active day
    pub fn session_cursor(&self) -> usize {
        self.session_cursor
    }

    /// Speaker cards in configured order
    pub fn speakers(&self) -> &[SpeakerCard] {
        &self.speakers
    }

    /// Preamble overlay, when a preamble is configured
    pub fn preamble(&self) -> Option<&DetailOverlay> {
        self.preamble.as_ref()
    }

    /// Current screen regions
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::for_area(self.area)
    }

    /// Renderer choice for the current terminal width
    pub fn layout_kind(&self) -> LayoutKind {
        Viewport::new(self.area.width, self.area.height).classify(self.compact_breakpoint)
    }

    /// Which overlay is open, if any
    pub fn open_overlay(&self) -> Option<OpenOverlay> {
        if self.session_overlay.is_open() {
            return Some(OpenOverlay::Session);
        }
        if self.preamble.as_ref().is_some_and(DetailOverlay::is_open) {
            return Some(OpenOverlay::Preamble);
        }
        self.speakers
            .iter()
            .position(|c| c.overlay().is_open())
            .map(OpenOverlay::Speaker)
    }

    fn overlay(&self, which: OpenOverlay) -> Option<&DetailOverlay> {
        match which {
            OpenOverlay::Session => Some(&self.session_overlay),
            OpenOverlay::Preamble => self.preamble.as_ref(),
            OpenOverlay::Speaker(i) => self.speakers.get(i).map(SpeakerCard::overlay),
        }
    }

    fn overlay_mut(&mut self, which: OpenOverlay) -> Option<&mut DetailOverlay> {
        match which {
            OpenOverlay::Session => Some(&mut self.session_overlay),
            OpenOverlay::Preamble => self.preamble.as_mut(),
            OpenOverlay::Speaker(i) => self.speakers.get_mut(i).map(SpeakerCard::overlay_mut),
        }
    }

    fn overlay_by_id_mut(&mut self, id: OverlayId) -> Option<&mut DetailOverlay> {
        if self.session_overlay.id() == id {
            return Some(&mut self.session_overlay);
        }
        if let Some(preamble) = self.preamble.as_mut().filter(|o| o.id() == id) {
            return Some(preamble);
        }
        self.speakers
            .iter_mut()
            .map(SpeakerCard::overlay_mut)
            .find(|o| o.id() == id)
    }

    fn overlay_title(&self, which: OpenOverlay) -> &str {
        match which {
            OpenOverlay::Session => &self.session_title,
            OpenOverlay::Preamble => ABOUT_TITLE,
            OpenOverlay::Speaker(i) => self
                .speakers
                .get(i)
                .map_or("", |c| c.speaker().title.as_str()),
        }
    }

    /// Detail fetches queued since the last call
    pub fn take_requests(&mut self) -> Vec<DetailRequest> {
        std::mem::take(&mut self.pending)
    }

    // ========================================================================
    // Messages
    // ========================================================================

    /// Apply a fetch result; returns whether anything changed
    pub fn handle_message(&mut self, msg: ProgramMessage) -> bool {
        match msg {
            ProgramMessage::ScheduleFetched { mount, result } => {
                let today = today_string(self.clock.as_ref());
                let applied = self.program.apply_schedule(mount, result, &today);
                if applied {
                    self.session_cursor = 0;
                    self.program_scroll = 0;
                }
                applied
            }
            ProgramMessage::DetailFetched {
                overlay,
                generation,
                result,
            } => match self.overlay_by_id_mut(overlay) {
                Some(target) => target.apply_response(generation, result),
                None => {
                    tracing::debug!(?overlay, "detail response for unknown overlay");
                    false
                }
            },
        }
    }

    /// Terminal resized
    pub fn resize(&mut self, width: u16, height: u16) {
        self.area = Rect::new(0, 0, width, height);
    }

    // ========================================================================
    // Program page actions
    // ========================================================================

    fn active_sessions(&self) -> DaySessions {
        self.program
            .active_day()
            .map(DaySessions::from_day)
            .unwrap_or_default()
    }

    /// Run a day change; a different day starts at its top
    fn change_day(&mut self, change: impl FnOnce(&mut ProgramView) -> bool) {
        let before = self.program.active_index();
        if change(&mut self.program) && self.program.active_index() != before {
            self.session_cursor = 0;
            self.program_scroll = 0;
        }
    }

    /// Activate day `index`
    pub fn select_day(&mut self, index: usize) {
        self.change_day(|program| program.select_day(index));
    }

    fn move_session_cursor(&mut self, delta: i32) {
        let count = self.active_sessions().len();
        if count == 0 {
            return;
        }
        let next = offset(
            u16::try_from(self.session_cursor).unwrap_or(u16::MAX),
            delta,
            count - 1,
        );
        self.session_cursor = next as usize;
    }

    /// Open the detail overlay of session `ordinal` on the active day
    pub fn open_session(&mut self, ordinal: usize) -> ClickOutcome {
        let Some(session) = self.active_sessions().get(ordinal).cloned() else {
            return ClickOutcome::Ignored;
        };
        self.session_cursor = ordinal;
        self.session_title.clone_from(&session.title);
        // Inline content never needs a fetch
        let request = self
            .session_overlay
            .set_source(DetailContent::Inline(session.detail_markdown()));
        self.pending.extend(request);
        self.session_overlay.handle_click(ClickTarget::Summary)
    }

    /// Toggle the preamble overlay
    pub fn toggle_preamble(&mut self) -> ClickOutcome {
        match self.preamble.as_mut() {
            Some(preamble) => preamble.handle_click(ClickTarget::Summary),
            None => ClickOutcome::Ignored,
        }
    }

    /// Open the biography of speaker card `index`
    pub fn open_speaker(&mut self, index: usize) -> ClickOutcome {
        match self.speakers.get_mut(index) {
            Some(card) => {
                self.speaker_cursor = index;
                card.overlay_mut().handle_click(ClickTarget::Summary)
            }
            None => ClickOutcome::Ignored,
        }
    }

    /// Scroll the current page; ignored while an overlay holds the lock
    pub fn scroll_page(&mut self, delta: i32) -> bool {
        if self.scroll_lock.is_locked() {
            return false;
        }
        let (scroll, report) = match self.page {
            Page::Program => (&mut self.program_scroll, &self.program_report),
            Page::Speakers => (&mut self.speakers_scroll, &self.speakers_report),
        };
        let max = report
            .content_rows
            .saturating_sub(report.visible_rows as usize);
        let next = offset(*scroll, delta, max);
        let moved = next != *scroll;
        *scroll = next;
        moved
    }

    fn page_rows(&self) -> i32 {
        i32::from(self.layout().body.height.saturating_sub(2).max(1))
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        if let Some(which) = self.open_overlay() {
            self.handle_overlay_key(which, key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab | KeyCode::BackTab => {
                self.page = match self.page {
                    Page::Program => Page::Speakers,
                    Page::Speakers => Page::Program,
                };
            }
            KeyCode::Char('i') => {
                self.toggle_preamble();
            }
            KeyCode::PageDown | KeyCode::Char(' ') => {
                let rows = self.page_rows();
                self.scroll_page(rows);
            }
            KeyCode::PageUp => {
                let rows = self.page_rows();
                self.scroll_page(-rows);
            }
            KeyCode::Home => {
                self.scroll_page(i32::MIN / 2);
            }
            KeyCode::End => {
                self.scroll_page(i32::MAX / 2);
            }
            _ => match self.page {
                Page::Program => self.handle_program_key(key),
                Page::Speakers => self.handle_speakers_key(key),
            },
        }
    }

    fn handle_program_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.change_day(ProgramView::previous_day),
            KeyCode::Right | KeyCode::Char('l') => self.change_day(ProgramView::next_day),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.select_day(index);
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_session_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_session_cursor(1),
            KeyCode::Enter => {
                self.open_session(self.session_cursor);
            }
            _ => {}
        }
    }

    fn handle_speakers_key(&mut self, key: KeyEvent) {
        let count = self.speakers.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.speaker_cursor = self.speaker_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                self.speaker_cursor = (self.speaker_cursor + 1).min(count - 1);
            }
            KeyCode::Enter => {
                self.open_speaker(self.speaker_cursor);
            }
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, which: OpenOverlay, key: KeyEvent) {
        let geometry = OverlayGeometry::for_area(self.area);
        let Some(overlay) = self.overlay_mut(which) else {
            return;
        };
        let max = geometry.max_scroll(overlay);
        let page = i32::from(geometry.content.height.max(1));
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                overlay.handle_click(ClickTarget::CloseButton);
            }
            KeyCode::Up | KeyCode::Char('k') => overlay.scroll_panel(-1, max),
            KeyCode::Down | KeyCode::Char('j') => overlay.scroll_panel(1, max),
            KeyCode::PageUp => overlay.scroll_panel(-page, max),
            KeyCode::PageDown | KeyCode::Char(' ') => overlay.scroll_panel(page, max),
            KeyCode::Home => overlay.scroll_panel(-i32::from(max), max),
            KeyCode::End => overlay.scroll_panel(i32::from(max), max),
            _ => {}
        }
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(x, y),
            MouseEventKind::ScrollUp => self.handle_wheel(-WHEEL_STEP),
            MouseEventKind::ScrollDown => self.handle_wheel(WHEEL_STEP),
            _ => {}
        }
    }

    fn handle_wheel(&mut self, delta: i32) {
        if let Some(which) = self.open_overlay() {
            let geometry = OverlayGeometry::for_area(self.area);
            if let Some(overlay) = self.overlay_mut(which) {
                let max = geometry.max_scroll(overlay);
                overlay.scroll_panel(delta, max);
            }
            return;
        }
        self.scroll_page(delta);
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        if let Some(which) = self.open_overlay() {
            let target = OverlayGeometry::for_area(self.area).target_at(x, y);
            if let Some(overlay) = self.overlay_mut(which) {
                let outcome = overlay.handle_click(target);
                tracing::debug!(?which, ?target, ?outcome, "overlay click");
            }
            return;
        }

        let layout = self.layout();
        if contains(layout.header, x, y) {
            if contains(self.about_rect(), x, y) {
                self.toggle_preamble();
            } else if let Some(index) = tab_at(&self.tab_rects(), x, y) {
                self.select_day(index);
            }
            return;
        }

        if contains(layout.body, x, y) {
            let local_y = y - layout.body.y;
            let report = match self.page {
                Page::Program => &self.program_report,
                Page::Speakers => &self.speakers_report,
            };
            let hit = report
                .hits
                .iter()
                .find(|h| contains(h.rect, x - layout.body.x, local_y))
                .map(|h| h.ordinal);
            match (self.page, hit) {
                (Page::Program, Some(ordinal)) => {
                    self.open_session(ordinal);
                }
                (Page::Speakers, Some(index)) => {
                    self.open_speaker(index);
                }
                _ => {}
            }
        }
    }

    fn tab_rects(&self) -> Vec<Rect> {
        let header = self.layout().header;
        if header.height < 2 {
            return Vec::new();
        }
        let row = Rect::new(header.x, header.y + 1, header.width, 1);
        tab_rects(&self.program.tabs(), row)
    }

    fn about_rect(&self) -> Rect {
        if self.preamble.is_none() {
            return Rect::default();
        }
        let header = self.layout().header;
        let width = (ABOUT_LABEL.len() as u16).min(header.width);
        Rect::new(header.x + header.width - width, header.y, width, 1)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Draw the header into a header-sized buffer
    pub fn render_header(&self, buf: &mut Buffer) {
        let area = buf.area;
        if area.height == 0 {
            return;
        }

        let title = self
            .program
            .conference_title()
            .unwrap_or("Conference Program");
        let mut spans = vec![Span::styled(
            title.to_string(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(zone) = self.program.time_zone() {
            spans.push(Span::styled(
                format!("  ({zone})"),
                Style::default().fg(theme::DIM_GRAY),
            ));
        }
        let page = match self.page {
            Page::Program => "  Program",
            Page::Speakers => "  Speakers",
        };
        spans.push(Span::styled(page, Style::default().fg(theme::DIM_GRAY)));
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let about = self.about_rect();
        if about.width > 0 {
            buf.set_stringn(
                about.x,
                about.y,
                ABOUT_LABEL,
                about.width as usize,
                Style::default().fg(theme::LINK_BLUE),
            );
        }

        if area.height > 1 && self.page == Page::Program {
            let tabs = self.program.tabs();
            let row = Rect::new(area.x, area.y + 1, area.width, 1);
            DayTabs::new(&tabs).render(row, buf);
        }
        if area.height > 2 {
            buf.set_string(
                area.x,
                area.y + 2,
                "─".repeat(area.width as usize),
                Style::default().fg(theme::DIM_GRAY),
            );
        }
    }

    /// Draw the active page into a body-sized buffer
    pub fn render_body(&mut self, buf: &mut Buffer) {
        match self.page {
            Page::Program => self.render_program(buf),
            Page::Speakers => {
                let frame = FrameState::new(self.speakers_scroll, Some(self.speaker_cursor));
                SpeakersView::new(&self.speakers, &frame).render(buf.area, buf);
                self.speakers_report = frame.into_report();
            }
        }
    }

    fn render_program(&mut self, buf: &mut Buffer) {
        let area = buf.area;
        match self.program.phase() {
            ProgramPhase::Loading => {
                buf.set_string(
                    area.x,
                    area.y,
                    "Loading program…",
                    Style::default().fg(theme::DIM_GRAY),
                );
                self.program_report = RenderReport::default();
            }
            ProgramPhase::Error(message) => {
                buf.set_stringn(
                    area.x,
                    area.y,
                    message,
                    area.width as usize,
                    Style::default().fg(theme::ERROR_RED),
                );
                self.program_report = RenderReport::default();
            }
            ProgramPhase::Ready => {
                let frame = || FrameState::new(self.program_scroll, Some(self.session_cursor));
                let full = FullDayView::new(frame());
                let compact = CompactDayView::new(frame());
                let layout = self.layout_kind();
                self.program.render_active(layout, &full, &compact, buf);
                let used = match layout {
                    LayoutKind::Full => full.into_frame(),
                    LayoutKind::Compact => compact.into_frame(),
                };
                self.program_report = used.into_report();
            }
        }
    }

    /// Draw key hints into a status-sized buffer
    pub fn render_status(&self, buf: &mut Buffer) {
        let hints = if self.open_overlay().is_some() {
            " ↑/↓ scroll  esc close"
        } else {
            match self.page {
                Page::Program => " ←/→ day  ↑/↓ session  ⏎ details  tab speakers  q quit",
                Page::Speakers => " ↑/↓ speaker  ⏎ biography  tab program  q quit",
            }
        };
        let area = buf.area;
        buf.set_stringn(
            area.x,
            area.y,
            hints,
            area.width as usize,
            Style::default().fg(theme::DIM_GRAY),
        );
    }

    /// Draw the open overlay into a full-screen buffer; false when none is open
    pub fn render_overlay(&self, buf: &mut Buffer) -> bool {
        let Some(which) = self.open_overlay() else {
            return false;
        };
        let Some(overlay) = self.overlay(which) else {
            return false;
        };
        let styles = match which {
            OpenOverlay::Speaker(_) => {
                MarkdownStyles::default().with_paragraph(theme::speaker_bio())
            }
            OpenOverlay::Session | OpenOverlay::Preamble => MarkdownStyles::default(),
        };
        OverlayPanel::new(overlay, self.overlay_title(which))
            .styles(styles)
            .render(buf.area, buf);
        true
    }
}

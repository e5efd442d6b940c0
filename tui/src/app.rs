//! Main Application
//!
//! The App owns the terminal side of the program viewer:
//! - Event loop (keyboard, mouse, resize, fetch results)
//! - Background fetches for the schedule and detail documents
//! - Compositing the screen's regions into the terminal frame
//!
//! All page state lives in [`ProgramScreen`]; the App only moves events in
//! and frames out.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tokio::sync::mpsc;

use program_core::client::build_http_client;
use program_core::messages::{spawn_detail_fetch, spawn_schedule_fetch};
use program_core::{
    Clock, DetailFetcher, HttpDetailFetcher, HttpScheduleClient, ProgramConfig, ProgramMessage,
    ScheduleSource, SystemClock,
};

use crate::compositor::{Compositor, LayerId};
use crate::screen::{ProgramScreen, ScreenLayout};

/// Fetch results buffered before senders wait
const CHANNEL_CAPACITY: usize = 32;

/// Redraw interval when nothing happens
const TICK: Duration = Duration::from_millis(250);

/// Main application state
pub struct App {
    /// Page state
    screen: ProgramScreen,

    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,

    /// Where the schedule comes from
    schedule: Arc<dyn ScheduleSource>,
    /// Where detail documents come from
    details: Arc<dyn DetailFetcher>,

    /// Fetch tasks report here
    tx: mpsc::Sender<ProgramMessage>,
    rx: mpsc::Receiver<ProgramMessage>,

    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    header: LayerId,
    body: LayerId,
    status: LayerId,
    overlay: LayerId,
}

impl App {
    /// Create the app with HTTP sources from `config`
    pub fn new(config: &ProgramConfig) -> anyhow::Result<Self> {
        let size = crossterm::terminal::size()?;
        let http = build_http_client(config.request_timeout)?;
        let schedule = Arc::new(HttpScheduleClient::with_client(
            config.schedule_url.clone(),
            http.clone(),
        ));
        let details = Arc::new(HttpDetailFetcher::with_client(http));

        tracing::info!(
            url = %config.schedule_url,
            source = %config.source(),
            "program viewer starting"
        );
        Ok(Self::with_sources(
            config,
            schedule,
            details,
            Box::new(SystemClock),
            size,
        ))
    }

    /// Create the app over explicit sources and clock
    pub fn with_sources(
        config: &ProgramConfig,
        schedule: Arc<dyn ScheduleSource>,
        details: Arc<dyn DetailFetcher>,
        clock: Box<dyn Clock>,
        size: (u16, u16),
    ) -> Self {
        let area = Rect::new(0, 0, size.0, size.1);
        let regions = ScreenLayout::for_area(area);

        let mut compositor = Compositor::new(area);
        let layers = AppLayers {
            header: compositor.create_layer(regions.header, 10),
            body: compositor.create_layer(regions.body, 0),
            status: compositor.create_layer(regions.status, 10),
            overlay: compositor.create_layer(area, 100),
        };
        compositor.set_visible(layers.overlay, false);

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        Self {
            screen: ProgramScreen::new(config, clock, area),
            compositor,
            layers,
            schedule,
            details,
            tx,
            rx,
            size,
        }
    }

    /// Page state
    pub fn screen(&self) -> &ProgramScreen {
        &self.screen
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // One schedule fetch per mount
        spawn_schedule_fetch(Arc::clone(&self.schedule), self.screen.mount(), self.tx.clone());
        self.dispatch_requests();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.screen.is_running() {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => tracing::warn!("terminal event error: {}", e),
                        None => break,
                    }
                }

                // Fetch results
                Some(msg) = self.rx.recv() => {
                    self.screen.handle_message(msg);
                    // Drain whatever else already arrived
                    while let Ok(msg) = self.rx.try_recv() {
                        self.screen.handle_message(msg);
                    }
                }

                _ = tokio::time::sleep(TICK) => {}
            }

            self.dispatch_requests();
            self.render(terminal)?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.screen.handle_key(key),
            Event::Mouse(mouse) => self.screen.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Start the detail fetches the screen queued
    fn dispatch_requests(&mut self) {
        for request in self.screen.take_requests() {
            tracing::debug!(url = %request.url, generation = request.generation, "fetching detail");
            spawn_detail_fetch(Arc::clone(&self.details), request, self.tx.clone());
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let area = Rect::new(0, 0, width, height);
        let regions = ScreenLayout::for_area(area);

        self.compositor.resize(area);
        self.compositor.set_bounds(self.layers.header, regions.header);
        self.compositor.set_bounds(self.layers.body, regions.body);
        self.compositor.set_bounds(self.layers.status, regions.status);
        self.compositor.set_bounds(self.layers.overlay, area);
        self.screen.resize(width, height);
    }

    /// Draw every region into its layer
    fn compose(&mut self) {
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.header) {
            buf.reset();
            self.screen.render_header(buf);
        }
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.body) {
            buf.reset();
            self.screen.render_body(buf);
        }
        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            buf.reset();
            self.screen.render_status(buf);
        }
        let overlay_open = match self.compositor.layer_buffer_mut(self.layers.overlay) {
            Some(buf) => {
                buf.reset();
                self.screen.render_overlay(buf)
            }
            None => false,
        };
        self.compositor.set_visible(self.layers.overlay, overlay_open);
    }

    /// Render the current frame
    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.compose();

        terminal.draw(|frame| {
            let output = self.compositor.composite();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    if let Some(cell) = output.content.get(output.index_of(x, y)) {
                        buf[(x, y)] = cell.clone();
                    }
                }
            }
        })?;

        Ok(())
    }
}

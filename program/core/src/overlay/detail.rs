//! Detail Overlay State
//!
//! One overlay per summary element (speaker card, session row). The overlay
//! owns its content cache and its hold on the page scroll lock.
//!
//! # Click routing
//!
//! | Target        | Effect                  |
//! |---------------|-------------------------|
//! | `Summary`     | toggle                  |
//! | `CloseButton` | toggle                  |
//! | `CornerClose` | toggle                  |
//! | `Backdrop`    | toggle                  |
//! | `Panel`       | swallowed, no change    |
//!
//! # Content generations
//!
//! Every change of source bumps a generation counter. A fetch response is
//! applied only if it carries the latest generation, so a slow response for
//! an old source can never overwrite newer content.

use crate::error::FetchError;
use crate::messages::OverlayId;

use super::scroll_lock::{ScrollLock, ScrollLockGuard};

/// Where an overlay's long-form content comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailContent {
    /// Markdown document fetched from a URL
    Remote(String),
    /// Markdown already at hand (e.g. a session abstract)
    Inline(String),
}

/// A fetch the caller must run on behalf of an overlay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailRequest {
    /// Requesting overlay
    pub overlay: OverlayId,
    /// Generation the response must carry to be applied
    pub generation: u64,
    /// Document URL
    pub url: String,
}

/// Element of the overlay that received a click
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The summary element that owns the overlay
    Summary,
    /// The close button under the content
    CloseButton,
    /// The small close control in the panel corner
    CornerClose,
    /// The dimmed area around the panel
    Backdrop,
    /// Anywhere inside the panel itself
    Panel,
}

/// Result of routing a click
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The overlay opened
    Opened,
    /// The overlay closed
    Closed,
    /// The click had no effect on the overlay
    Ignored,
}

/// Modal detail panel state
#[derive(Debug)]
pub struct DetailOverlay {
    id: OverlayId,
    scroll_lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
    panel_scroll: u16,
    source: Option<DetailContent>,
    generation: u64,
    pending: bool,
    content: String,
}

impl DetailOverlay {
    /// Closed overlay with no content
    pub fn new(scroll_lock: ScrollLock) -> Self {
        Self {
            id: OverlayId::next(),
            scroll_lock,
            guard: None,
            panel_scroll: 0,
            source: None,
            generation: 0,
            pending: false,
            content: String::new(),
        }
    }

    /// This overlay's id, used to route fetch results
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Whether the panel is showing
    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// Current content (markdown); empty until loaded
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether a fetch for the latest generation is still outstanding
    ///
    /// Cleared by the matching response whether it succeeded or failed;
    /// a failed fetch is not retried, so the panel stays as it is.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Current source
    pub fn source(&self) -> Option<&DetailContent> {
        self.source.as_ref()
    }

    /// Latest generation issued
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Vertical scroll offset inside the panel
    pub fn panel_scroll(&self) -> u16 {
        self.panel_scroll
    }

    /// Open the panel; locks page scrolling and resets the panel to the top
    pub fn open(&mut self) {
        if self.guard.is_none() {
            self.guard = Some(self.scroll_lock.acquire());
            self.panel_scroll = 0;
            tracing::debug!(overlay = ?self.id, "overlay opened");
        }
    }

    /// Close the panel and release the scroll lock
    pub fn close(&mut self) {
        if self.guard.take().is_some() {
            tracing::debug!(overlay = ?self.id, "overlay closed");
        }
    }

    /// Flip between open and closed
    pub fn toggle(&mut self) -> ClickOutcome {
        if self.is_open() {
            self.close();
            ClickOutcome::Closed
        } else {
            self.open();
            ClickOutcome::Opened
        }
    }

    /// Route a click on one of the overlay's elements
    pub fn handle_click(&mut self, target: ClickTarget) -> ClickOutcome {
        match target {
            ClickTarget::Panel => ClickOutcome::Ignored,
            ClickTarget::Summary => self.toggle(),
            ClickTarget::CloseButton | ClickTarget::CornerClose | ClickTarget::Backdrop => {
                if self.is_open() {
                    self.toggle()
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    /// Scroll the panel by `delta` rows, clamped to `max`
    pub fn scroll_panel(&mut self, delta: i32, max: u16) {
        let next = i32::from(self.panel_scroll) + delta;
        self.panel_scroll = u16::try_from(next.clamp(0, i32::from(max))).unwrap_or(0);
    }

    /// Point the overlay at a content source
    ///
    /// Returns the fetch to run when the source is a new remote document.
    /// Setting the same source again does nothing. Existing content stays
    /// visible until the new content arrives.
    pub fn set_source(&mut self, source: DetailContent) -> Option<DetailRequest> {
        if self.source.as_ref() == Some(&source) {
            return None;
        }
        self.generation += 1;
        self.pending = matches!(source, DetailContent::Remote(_));
        let request = match &source {
            DetailContent::Remote(url) => Some(DetailRequest {
                overlay: self.id,
                generation: self.generation,
                url: url.clone(),
            }),
            DetailContent::Inline(text) => {
                self.content.clone_from(text);
                None
            }
        };
        self.source = Some(source);
        request
    }

    /// Apply a fetch result; returns whether the content changed
    ///
    /// Results for superseded generations are discarded. Failures are logged
    /// and leave the current content untouched.
    pub fn apply_response(&mut self, generation: u64, result: Result<String, FetchError>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                overlay = ?self.id,
                generation,
                latest = self.generation,
                "discarding superseded detail response"
            );
            return false;
        }
        self.pending = false;
        match result {
            Ok(text) => {
                self.content = text;
                true
            }
            Err(e) => {
                tracing::error!(overlay = ?self.id, "detail fetch failed: {}", e);
                false
            }
        }
    }
}

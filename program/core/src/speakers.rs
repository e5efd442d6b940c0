//! Speaker Cards
//!
//! A speaker card is a summary (name, one-line description) that opens a
//! [`DetailOverlay`] with the speaker's long-form biography. The biography is
//! a markdown document fetched when the card mounts and again whenever its
//! URL changes.

use serde::{Deserialize, Serialize};

use crate::overlay::{DetailContent, DetailOverlay, DetailRequest, ScrollLock};

/// A featured speaker, as configured
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Display name
    pub title: String,
    /// One-line summary shown on the card
    #[serde(default)]
    pub short_description: String,
    /// URL of the markdown biography
    pub long_description_url: String,
    /// Portrait reference (shown as a caption only)
    #[serde(default)]
    pub image: Option<String>,
}

/// A mounted speaker card and its overlay
#[derive(Debug)]
pub struct SpeakerCard {
    speaker: Speaker,
    overlay: DetailOverlay,
}

impl SpeakerCard {
    /// Mount a card; returns the biography fetch to run
    pub fn mount(speaker: Speaker, scroll_lock: ScrollLock) -> (Self, Option<DetailRequest>) {
        let mut overlay = DetailOverlay::new(scroll_lock);
        let request =
            overlay.set_source(DetailContent::Remote(speaker.long_description_url.clone()));
        (Self { speaker, overlay }, request)
    }

    /// The configured speaker
    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    /// The card's overlay
    pub fn overlay(&self) -> &DetailOverlay {
        &self.overlay
    }

    /// Mutable access to the card's overlay
    pub fn overlay_mut(&mut self) -> &mut DetailOverlay {
        &mut self.overlay
    }

    /// Point the card at a new biography; returns the fetch to run
    pub fn set_long_description(&mut self, url: impl Into<String>) -> Option<DetailRequest> {
        let url = url.into();
        self.speaker.long_description_url.clone_from(&url);
        self.overlay.set_source(DetailContent::Remote(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn speaker() -> Speaker {
        Speaker {
            title: "Ada Lovelace".into(),
            short_description: "Keynote".into(),
            long_description_url: "https://example.org/ada.md".into(),
            image: None,
        }
    }

    #[test]
    fn test_mount_requests_biography_once() {
        let (card, request) = SpeakerCard::mount(speaker(), ScrollLock::new());
        let request = request.unwrap();
        assert_eq!(request.url, "https://example.org/ada.md");
        assert_eq!(request.overlay, card.overlay().id());
        assert!(!card.overlay().is_open());
    }

    #[test]
    fn test_changing_url_refetches() {
        let (mut card, _) = SpeakerCard::mount(speaker(), ScrollLock::new());
        assert!(card.set_long_description("https://example.org/ada.md").is_none());
        let r = card.set_long_description("https://example.org/ada-v2.md").unwrap();
        assert_eq!(r.generation, 2);
        assert_eq!(card.speaker().long_description_url, "https://example.org/ada-v2.md");
    }
}

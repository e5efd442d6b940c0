//! Speakers Page
//!
//! Featured speaker cards, one block per speaker: name, summary and the
//! portrait caption. Selecting a card opens its biography overlay.

use program_core::SpeakerCard;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{StatefulWidget, Widget};

use super::{draw_rows, FrameState, Row};
use crate::theme;
use crate::widgets::{wrap_plain, TextBlock, TextBlockState};

/// Shown when no speakers are configured
const NO_SPEAKERS: &str = "No featured speakers announced yet.";

fn card_rows(index: usize, card: &SpeakerCard, width: usize, highlight: bool) -> Vec<Row> {
    let speaker = card.speaker();
    let mut lines = wrap_plain(
        &speaker.title,
        width,
        Style::default()
            .fg(theme::SPEAKER_GREEN)
            .add_modifier(Modifier::BOLD),
    );
    lines.extend(wrap_plain(
        &speaker.short_description,
        width,
        Style::default().fg(theme::TEXT),
    ));
    if let Some(image) = &speaker.image {
        lines.push(Line::styled(
            format!("portrait: {image}"),
            Style::default().fg(theme::DIM_GRAY),
        ));
    }

    let mut rows: Vec<Row> = lines
        .into_iter()
        .map(|line| Row {
            line,
            item: Some(index),
            highlight,
        })
        .collect();
    rows.push(Row::blank());
    rows
}

/// Card list widget for the speakers page
pub struct SpeakersView<'a> {
    cards: &'a [SpeakerCard],
    frame: &'a FrameState,
}

impl<'a> SpeakersView<'a> {
    /// Cards drawn with the frame's scroll and cursor; hits land in `frame`
    pub fn new(cards: &'a [SpeakerCard], frame: &'a FrameState) -> Self {
        Self { cards, frame }
    }
}

impl Widget for SpeakersView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() {
            let lines = [Line::styled(NO_SPEAKERS, Style::default().fg(theme::DIM_GRAY))];
            TextBlock::new(&lines).render(area, buf, &mut TextBlockState::default());
            return;
        }

        let rows: Vec<Row> = self
            .cards
            .iter()
            .enumerate()
            .flat_map(|(i, card)| {
                card_rows(i, card, area.width as usize, self.frame.cursor == Some(i))
            })
            .collect();
        draw_rows(buf, area, &rows, self.frame.scroll, self.frame);
        self.frame.record(|r| {
            r.content_rows = rows.len();
            r.visible_rows = area.height;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::rows;
    use program_core::{ScrollLock, Speaker};
    use pretty_assertions::assert_eq;

    fn cards() -> Vec<SpeakerCard> {
        let lock = ScrollLock::new();
        [("Ada Lovelace", "Keynote", Some("ada.png")), ("Grace Hopper", "Compilers", None)]
            .into_iter()
            .map(|(title, short, image)| {
                let speaker = Speaker {
                    title: title.into(),
                    short_description: short.into(),
                    long_description_url: format!("https://example.org/{short}.md"),
                    image: image.map(str::to_string),
                };
                SpeakerCard::mount(speaker, lock.clone()).0
            })
            .collect()
    }

    #[test]
    fn test_cards_and_hits() {
        let cards = cards();
        let frame = FrameState::new(0, Some(1));
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 8));
        SpeakersView::new(&cards, &frame).render(buf.area, &mut buf);

        let text = rows(&buf);
        assert_eq!(text[0], "Ada Lovelace");
        assert_eq!(text[1], "Keynote");
        assert_eq!(text[2], "portrait: ada.png");
        assert_eq!(text[4], "Grace Hopper");
        assert_eq!(buf[(0, 4)].bg, theme::CURSOR_BG);

        let report = frame.into_report();
        assert!(report.hits.iter().any(|h| h.ordinal == 1 && h.rect.y == 5));
        assert_eq!(report.content_rows, 7);
    }

    #[test]
    fn test_no_speakers() {
        let frame = FrameState::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 2));
        SpeakersView::new(&[], &frame).render(buf.area, &mut buf);
        assert_eq!(rows(&buf)[0], NO_SPEAKERS);
    }
}

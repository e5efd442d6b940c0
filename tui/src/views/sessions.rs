//! Session Extraction
//!
//! Reads sessions out of a day's opaque fields. Days follow the pretalx
//! export shape:
//!
//! ```text
//! { "date": "2024-11-06",
//!   "rooms": { "<room>": [ { "start": "09:00", "duration": "00:30",
//!                            "title": "...", "track": "...",
//!                            "persons": [ { "public_name": "..." } ],
//!                            "abstract": "...", "description": "..." } ] } }
//! ```
//!
//! Missing or malformed fields degrade to empty strings; a day without a
//! `rooms` object simply has no sessions.

use program_core::DaySchedule;
use serde_json::Value;

/// One talk or workshop
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Position in the day's chronological order (the session cursor)
    pub ordinal: usize,
    /// Room name
    pub room: String,
    /// Start time as given (`HH:MM`)
    pub start: String,
    /// Duration as given (`HH:MM`)
    pub duration: String,
    /// Talk title
    pub title: String,
    /// Speaker display names
    pub speakers: Vec<String>,
    /// Track name
    pub track: Option<String>,
    /// Short abstract (markdown)
    pub abstract_text: String,
    /// Long description (markdown)
    pub description: String,
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

impl Session {
    fn from_value(room: &str, value: &Value) -> Self {
        let speakers = value
            .get("persons")
            .and_then(Value::as_array)
            .map(|persons| {
                persons
                    .iter()
                    .filter_map(|p| {
                        p.get("public_name")
                            .or_else(|| p.get("name"))
                            .and_then(Value::as_str)
                    })
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let track = Some(text(value, "track")).filter(|t| !t.is_empty());

        Self {
            ordinal: 0,
            room: room.to_string(),
            start: text(value, "start"),
            duration: text(value, "duration"),
            title: text(value, "title"),
            speakers,
            track,
            abstract_text: text(value, "abstract"),
            description: text(value, "description"),
        }
    }

    /// Speaker names joined for display
    pub fn speaker_line(&self) -> String {
        self.speakers.join(", ")
    }

    /// Markdown document for the session detail panel
    pub fn detail_markdown(&self) -> String {
        let mut doc = format!("# {}\n\n", self.title);

        let mut when = self.start.clone();
        if !self.duration.is_empty() {
            when.push_str(&format!(" ({})", self.duration));
        }
        if !self.room.is_empty() {
            when.push_str(&format!(" · {}", self.room));
        }
        doc.push_str(&format!("**{}**\n\n", when.trim()));

        if !self.speakers.is_empty() {
            doc.push_str(&format!("{}\n\n", self.speaker_line()));
        }
        if let Some(track) = &self.track {
            doc.push_str(&format!("*{track}*\n\n"));
        }
        for part in [&self.abstract_text, &self.description] {
            if !part.is_empty() {
                doc.push_str(part);
                doc.push_str("\n\n");
            }
        }
        doc.trim_end().to_string()
    }
}

/// All sessions of one day
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DaySessions {
    rooms: Vec<String>,
    sessions: Vec<Session>,
}

impl DaySessions {
    /// Extract sessions from a day
    ///
    /// Rooms keep document order; sessions are ordered by start time, ties
    /// broken by room order.
    pub fn from_day(day: &DaySchedule) -> Self {
        let Some(rooms) = day.field("rooms").and_then(Value::as_object) else {
            return Self::default();
        };

        let mut sessions = Vec::new();
        for (room, entries) in rooms {
            for entry in entries.as_array().into_iter().flatten() {
                sessions.push(Session::from_value(room, entry));
            }
        }
        // Stable sort keeps room order for equal start times
        sessions.sort_by(|a, b| a.start.cmp(&b.start));
        for (ordinal, session) in sessions.iter_mut().enumerate() {
            session.ordinal = ordinal;
        }

        Self {
            rooms: rooms.keys().cloned().collect(),
            sessions,
        }
    }

    /// Whether the day has no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Sessions in chronological order
    pub fn chronological(&self) -> &[Session] {
        &self.sessions
    }

    /// Session by ordinal
    pub fn get(&self, ordinal: usize) -> Option<&Session> {
        self.sessions.get(ordinal)
    }

    /// Rooms that have at least one session, with their sessions
    pub fn by_room(&self) -> Vec<(&str, Vec<&Session>)> {
        self.rooms
            .iter()
            .map(|room| {
                let sessions: Vec<&Session> =
                    self.sessions.iter().filter(|s| &s.room == room).collect();
                (room.as_str(), sessions)
            })
            .filter(|(_, sessions)| !sessions.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn day() -> DaySchedule {
        let fields = json!({
            "rooms": {
                "Main Hall": [
                    {"start": "10:00", "duration": "00:30", "title": "Tiles at scale",
                     "persons": [{"public_name": "Ana"}, {"public_name": "Ben"}],
                     "track": "Data", "abstract": "Vector tiles.", "description": ""},
                    {"start": "09:00", "duration": "01:00", "title": "Opening",
                     "persons": [], "track": null}
                ],
                "Room 2": [
                    {"start": "09:00", "duration": "00:30", "title": "QGIS tips",
                     "persons": [{"public_name": "Cy"}]}
                ],
                "Empty Room": []
            }
        });
        let Value::Object(map) = fields else {
            unreachable!()
        };
        DaySchedule::new("2024-11-06", map)
    }

    #[test]
    fn test_chronological_order_ties_by_room() {
        let sessions = DaySessions::from_day(&day());
        let titles: Vec<&str> = sessions
            .chronological()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Opening", "QGIS tips", "Tiles at scale"]);
        assert_eq!(sessions.get(2).map(|s| s.ordinal), Some(2));
    }

    #[test]
    fn test_by_room_skips_empty_rooms() {
        let sessions = DaySessions::from_day(&day());
        let rooms: Vec<&str> = sessions.by_room().iter().map(|(r, _)| *r).collect();
        assert_eq!(rooms, vec!["Main Hall", "Room 2"]);
    }

    #[test]
    fn test_fields_degrade_gracefully() {
        let sessions = DaySessions::from_day(&day());
        let opening = &sessions.chronological()[0];
        assert_eq!(opening.track, None);
        assert!(opening.speakers.is_empty());
        assert_eq!(opening.abstract_text, "");

        let tiles = &sessions.chronological()[2];
        assert_eq!(tiles.speaker_line(), "Ana, Ben");
        assert_eq!(tiles.track.as_deref(), Some("Data"));
    }

    #[test]
    fn test_day_without_rooms_is_empty() {
        let empty = DaySchedule::new("2024-11-05", serde_json::Map::new());
        assert!(DaySessions::from_day(&empty).is_empty());
    }

    #[test]
    fn test_detail_markdown() {
        let sessions = DaySessions::from_day(&day());
        let md = sessions.chronological()[2].detail_markdown();
        assert_eq!(
            md,
            "# Tiles at scale\n\n**10:00 (00:30) · Main Hall**\n\nAna, Ben\n\n*Data*\n\nVector tiles."
        );
    }
}

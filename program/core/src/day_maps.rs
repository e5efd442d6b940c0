//! Day Label Maps
//!
//! Static, configuration-supplied tables keyed by `YYYY-MM-DD`:
//!
//! - [`DayTitleMap`]: tab label per day
//! - [`NoEventsMap`]: fallback text (markdown) for days without sessions
//!
//! Dates missing from a map are not errors. They render blank; the program
//! view logs a warning for each one when the schedule loads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schedule::DaySchedule;

fn missing_dates<'a>(
    map: &BTreeMap<String, String>,
    days: &'a [DaySchedule],
) -> Vec<&'a str> {
    days.iter()
        .map(DaySchedule::date)
        .filter(|d| !map.contains_key(*d))
        .collect()
}

/// Human-readable label per conference day
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayTitleMap(BTreeMap<String, String>);

impl DayTitleMap {
    /// Build from `(date, label)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// The 2024 FOSS4G SotM Oceania days
    pub fn conference_2024() -> Self {
        Self::from_pairs([
            ("2024-11-05", "Tuesday 5th (Workshops)"),
            ("2024-11-06", "Wednesday 6th (Conference)"),
            ("2024-11-07", "Thursday 7th (Conference)"),
            ("2024-11-08", "Friday 8th (Community Day)"),
        ])
    }

    /// Label for `date`, if mapped
    pub fn get(&self, date: &str) -> Option<&str> {
        self.0.get(date).map(String::as_str)
    }

    /// Dates of `days` that have no label
    pub fn missing<'a>(&self, days: &'a [DaySchedule]) -> Vec<&'a str> {
        missing_dates(&self.0, days)
    }

    /// All keys, for validation
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Fallback content per day when a day has no sessions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoEventsMap(BTreeMap<String, String>);

impl NoEventsMap {
    /// Build from `(date, markdown)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Fallback text for the 2024 FOSS4G SotM Oceania days
    pub fn conference_2024() -> Self {
        Self::from_pairs([
            ("2024-11-05", "No workshops today"),
            ("2024-11-06", "No events today"),
            ("2024-11-07", "No events today"),
            (
                "2024-11-08",
                "We have some great events in the pipeline including a field trip to Mt Wellington.\n\n\
                 If you would like to propose a hackathon or something, let us know via \
                 [program@foss4g-oceania.org](mailto:program@foss4g-oceania.org)",
            ),
        ])
    }

    /// Fallback for `date`, if mapped
    pub fn get(&self, date: &str) -> Option<&str> {
        self.0.get(date).map(String::as_str)
    }

    /// Dates of `days` that have no fallback
    pub fn missing<'a>(&self, days: &'a [DaySchedule]) -> Vec<&'a str> {
        missing_dates(&self.0, days)
    }

    /// All keys, for validation
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    #[test]
    fn test_conference_titles() {
        let titles = DayTitleMap::conference_2024();
        assert_eq!(titles.get("2024-11-06"), Some("Wednesday 6th (Conference)"));
        assert_eq!(titles.get("2024-12-25"), None);
    }

    #[test]
    fn test_missing_dates_in_document_order() {
        let titles = DayTitleMap::conference_2024();
        let days = vec![
            DaySchedule::new("2024-11-09", Map::new()),
            DaySchedule::new("2024-11-05", Map::new()),
            DaySchedule::new("2024-11-04", Map::new()),
        ];
        assert_eq!(titles.missing(&days), vec!["2024-11-09", "2024-11-04"]);
    }

    #[test]
    fn test_community_day_fallback_has_contact_link() {
        let no_events = NoEventsMap::conference_2024();
        let text = no_events.get("2024-11-08").unwrap();
        assert!(text.contains("mailto:program@foss4g-oceania.org"));
        assert_eq!(no_events.get("2024-11-05"), Some("No workshops today"));
    }

    #[test]
    fn test_maps_deserialize_from_toml_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            day_titles: DayTitleMap,
        }
        let w: Wrapper = toml::from_str("[day_titles]\n\"2025-02-01\" = \"Saturday\"\n").unwrap();
        assert_eq!(w.day_titles.get("2025-02-01"), Some("Saturday"));
    }
}

//! Schedule Document Model
//!
//! The remote schedule is a pretalx-style export. The core only cares about
//! the ordered day list at `schedule.conference.days` and each day's `date`;
//! everything else in a day object is kept verbatim for the renderers.

use serde_json::{Map, Value};

use crate::date::is_date_string;
use crate::error::FetchError;

/// Path of the day list inside the schedule document
pub const DAYS_PATH: &str = "schedule.conference.days";

/// One calendar day of the fetched schedule
///
/// The full day object is retained in `fields`; renderers read sessions,
/// rooms and time bounds from it. The core never mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct DaySchedule {
    date: String,
    fields: Map<String, Value>,
}

impl DaySchedule {
    /// Build a day from its date and the raw day object
    pub fn new(date: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            date: date.into(),
            fields,
        }
    }

    /// Calendar date (`YYYY-MM-DD`)
    pub fn date(&self) -> &str {
        &self.date
    }

    /// All fields of the raw day object, including `date`
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// A single raw field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn from_value(index: usize, value: Value) -> Result<Self, FetchError> {
        let Value::Object(fields) = value else {
            return Err(FetchError::InvalidDay { index });
        };
        let date = fields
            .get("date")
            .and_then(Value::as_str)
            .ok_or(FetchError::InvalidDay { index })?
            .to_string();
        Ok(Self { date, fields })
    }
}

/// The fetched schedule, normalized to its ordered day list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleDocument {
    /// Conference title, when the document carries one
    pub title: Option<String>,
    /// Conference time zone name, when the document carries one
    pub time_zone: Option<String>,
    /// Days in document order
    pub days: Vec<DaySchedule>,
}

impl ScheduleDocument {
    /// Parse a schedule document from its JSON text
    pub fn from_json(text: &str) -> Result<Self, FetchError> {
        let root: Value = serde_json::from_str(text)?;
        Self::from_value(root)
    }

    /// Extract the day list from an already parsed document
    pub fn from_value(mut root: Value) -> Result<Self, FetchError> {
        let conference = root
            .get_mut("schedule")
            .and_then(|s| s.get_mut("conference"))
            .ok_or(FetchError::MissingDays { path: DAYS_PATH })?;

        let title = conference
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string);
        let time_zone = conference
            .get("time_zone_name")
            .and_then(Value::as_str)
            .map(str::to_string);

        let Some(Value::Array(raw_days)) = conference.get_mut("days").map(Value::take) else {
            return Err(FetchError::MissingDays { path: DAYS_PATH });
        };

        let days = raw_days
            .into_iter()
            .enumerate()
            .map(|(i, v)| DaySchedule::from_value(i, v))
            .collect::<Result<Vec<_>, _>>()?;

        let doc = Self {
            title,
            time_zone,
            days,
        };
        for problem in doc.date_order_problems() {
            tracing::warn!("{}", problem);
        }
        Ok(doc)
    }

    /// Dates in document order
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(DaySchedule::date)
    }

    /// Describe dates that are malformed, duplicated or out of order
    ///
    /// Such documents are still accepted; the problems are only reported.
    pub fn date_order_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut previous: Option<&str> = None;
        for date in self.dates() {
            if !is_date_string(date) {
                problems.push(format!("day date {date:?} is not YYYY-MM-DD"));
            }
            if let Some(prev) = previous {
                if date == prev {
                    problems.push(format!("day date {date} appears more than once"));
                } else if date < prev {
                    problems.push(format!("day date {date} comes after {prev}"));
                }
            }
            previous = Some(date);
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(days: Value) -> Value {
        json!({
            "schedule": {
                "conference": {
                    "title": "FOSS4G SotM Oceania 2024",
                    "time_zone_name": "Pacific/Auckland",
                    "days": days,
                }
            }
        })
    }

    #[test]
    fn test_days_extracted_in_order() {
        let value = doc(json!([
            {"index": 1, "date": "2024-11-05", "rooms": {}},
            {"index": 2, "date": "2024-11-06", "rooms": {}},
        ]));
        let parsed = ScheduleDocument::from_value(value).unwrap();
        let dates: Vec<_> = parsed.dates().collect();
        assert_eq!(dates, vec!["2024-11-05", "2024-11-06"]);
        assert_eq!(parsed.title.as_deref(), Some("FOSS4G SotM Oceania 2024"));
        assert_eq!(parsed.time_zone.as_deref(), Some("Pacific/Auckland"));
    }

    #[test]
    fn test_day_fields_kept_verbatim() {
        let day = json!({"index": 3, "date": "2024-11-07", "day_start": "x", "rooms": {"A": []}});
        let parsed = ScheduleDocument::from_value(doc(json!([day.clone()]))).unwrap();
        assert_eq!(Value::Object(parsed.days[0].fields().clone()), day);
        assert_eq!(parsed.days[0].field("day_start"), Some(&json!("x")));
    }

    #[test]
    fn test_missing_path_is_error() {
        let err = ScheduleDocument::from_value(json!({"schedule": {}})).unwrap_err();
        assert!(matches!(err, FetchError::MissingDays { .. }));

        let err = ScheduleDocument::from_value(doc(json!({"not": "a list"}))).unwrap_err();
        assert!(matches!(err, FetchError::MissingDays { .. }));
    }

    #[test]
    fn test_day_without_date_is_error() {
        let err = ScheduleDocument::from_value(doc(json!([{"index": 1}]))).unwrap_err();
        assert!(matches!(err, FetchError::InvalidDay { index: 0 }));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = ScheduleDocument::from_json("<html>502</html>").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_empty_day_list_is_ok() {
        let parsed = ScheduleDocument::from_value(doc(json!([]))).unwrap();
        assert!(parsed.days.is_empty());
    }

    #[test]
    fn test_date_order_problems_reported() {
        let parsed = ScheduleDocument::from_value(doc(json!([
            {"date": "2024-11-06"},
            {"date": "2024-11-05"},
            {"date": "2024-11-05"},
            {"date": "someday"},
        ])))
        .unwrap();
        let problems = parsed.date_order_problems();
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("comes after"));
        assert!(problems[1].contains("more than once"));
        assert!(problems[2].contains("not YYYY-MM-DD"));
    }
}

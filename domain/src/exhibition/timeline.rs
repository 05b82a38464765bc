//! Chronological timeline built from exhibit dates.

use super::entities::Exhibit;
use crate::core::string::truncate_with_ellipsis;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const DESCRIPTION_LIMIT: usize = 200;

static YEAR_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})\b").ok());

/// First standalone four-digit year in `text`, if any.
pub fn first_year(text: &str) -> Option<&str> {
    YEAR_PATTERN
        .as_ref()?
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn contains_year(text: &str) -> bool {
    first_year(text).is_some()
}

/// One dated entry on the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Four-digit year string as extracted, e.g. "1492"
    pub year: String,
    pub event: String,
    pub description: String,
}

/// Build a timeline from exhibits.
///
/// Each exhibit contributes at most one event, dated by the first year found
/// in its time period followed by its description. Exhibits without a year
/// are skipped. The result is stably sorted by the year string.
pub fn build_timeline<'a, I>(exhibits: I) -> Vec<TimelineEvent>
where
    I: IntoIterator<Item = &'a Exhibit>,
{
    let mut events: Vec<TimelineEvent> = exhibits
        .into_iter()
        .filter_map(|exhibit| {
            let haystack = format!("{} {}", exhibit.time_period, exhibit.description);
            let year = first_year(&haystack)?.to_string();
            Some(TimelineEvent {
                year,
                event: exhibit.name.clone(),
                description: truncate_with_ellipsis(&exhibit.description, DESCRIPTION_LIMIT),
            })
        })
        .collect();

    events.sort_by(|a, b| a.year.cmp(&b.year));
    events
}

/// Render a timeline as plain text.
pub fn format_timeline(events: &[TimelineEvent]) -> String {
    if events.is_empty() {
        return "No timeline events available.".to_string();
    }

    let mut text = format!("TIMELINE\n{}\n\n", "=".repeat(50));
    for event in events {
        text.push_str(&format!("{}: {}\n", event.year, event.event));
        text.push_str(&format!("   {}\n\n", event.description));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_year() {
        assert_eq!(first_year("Built in 1492 and rebuilt 1500"), Some("1492"));
        assert_eq!(first_year("circa 12345 or 99"), None);
        assert_eq!(first_year("Modern Era"), None);
    }

    #[test]
    fn test_timeline_sorted_ascending() {
        let exhibits = vec![
            Exhibit::new("Ziggurat", "Temple tower.").with_time_period("2000 BCE"),
            Exhibit::new("Chariot", "War vehicle.").with_time_period("1500 BCE"),
        ];
        let timeline = build_timeline(&exhibits);
        let years: Vec<&str> = timeline.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["1500", "2000"]);
        assert_eq!(timeline[0].event, "Chariot");
    }

    #[test]
    fn test_year_taken_from_description_when_period_has_none() {
        let exhibits =
            vec![Exhibit::new("Press", "Invented around 1440 in Mainz.").with_time_period("Renaissance")];
        let timeline = build_timeline(&exhibits);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].year, "1440");
    }

    #[test]
    fn test_undated_exhibits_skipped_and_description_truncated() {
        let long = "a".repeat(250);
        let exhibits = vec![
            Exhibit::new("Undated", "No dates here.").with_time_period("Modern Era"),
            Exhibit::new("Dated", long).with_time_period("1900"),
        ];
        let timeline = build_timeline(&exhibits);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].description.len(), 203);
        assert!(timeline[0].description.ends_with("..."));
    }

    #[test]
    fn test_format_timeline() {
        assert_eq!(format_timeline(&[]), "No timeline events available.");
        let text = format_timeline(&[TimelineEvent {
            year: "1066".to_string(),
            event: "Hastings".to_string(),
            description: "Battle.".to_string(),
        }]);
        assert!(text.starts_with("TIMELINE\n"));
        assert!(text.contains("1066: Hastings\n   Battle.\n"));
    }
}

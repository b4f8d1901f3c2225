use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chart::Hue;

/// The only date layout accepted in event documents (day granularity, no timezone).
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Expected directional effect of a news event on the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    Upward,
    Downward,
    Mixed,
    #[serde(rename = "Potential Upward")]
    PotentialUpward,
}

impl Impact {
    /// The exact string used in event documents and shown in the detail panel.
    pub fn label(&self) -> &'static str {
        match self {
            Impact::Upward => "Upward",
            Impact::Downward => "Downward",
            Impact::Mixed => "Mixed",
            Impact::PotentialUpward => "Potential Upward",
        }
    }

    /// Hue of the marker dot drawn on the chart.
    pub fn marker_hue(&self) -> Hue {
        match self {
            Impact::Upward | Impact::PotentialUpward => Hue::Green,
            Impact::Downward => Hue::Red,
            Impact::Mixed => Hue::Yellow,
        }
    }

    /// Hue of the impact label in the detail panel.
    ///
    /// Differs from [`Impact::marker_hue`] for `Mixed` (orange text, yellow dot).
    pub fn detail_hue(&self) -> Hue {
        match self {
            Impact::Upward | Impact::PotentialUpward => Hue::Green,
            Impact::Downward => Hue::Red,
            Impact::Mixed => Hue::Orange,
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A curated news event shown as a marker on the price chart.
///
/// The `id` is never read from the source document; every decode
/// assigns a fresh one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, generated at load time
    #[serde(skip_deserializing, default = "Uuid::new_v4")]
    pub id: Uuid,

    pub name: String,

    /// Day of the event (no time component)
    #[serde(with = "event_date")]
    pub date: NaiveDate,

    pub impact: Impact,

    /// Example headline / blurb for the detail panel
    pub news_example: String,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        impact: Impact,
        news_example: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            date,
            impact,
            news_example: news_example.into(),
        }
    }
}

/// Top-level shape of the bundled events document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsData {
    pub past_events: Vec<Event>,
    pub upcoming_events: Vec<Event>,
}

impl EventsData {
    /// Past events followed by upcoming ones. Source grouping is kept;
    /// nothing is re-sorted by date.
    pub fn into_events(self) -> Vec<Event> {
        let mut events = self.past_events;
        events.extend(self.upcoming_events);
        events
    }

    pub fn len(&self) -> usize {
        self.past_events.len() + self.upcoming_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serde adapter for `yyyy-MM-dd` day strings.
pub(crate) mod event_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::EVENT_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(EVENT_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if !has_day_shape(&raw) {
            return Err(serde::de::Error::custom(format!(
                "date '{raw}' does not match expected format yyyy-MM-dd"
            )));
        }
        NaiveDate::parse_from_str(&raw, EVENT_DATE_FORMAT).map_err(|e| {
            serde::de::Error::custom(format!(
                "date '{raw}' does not match expected format yyyy-MM-dd ({e})"
            ))
        })
    }

    /// Exactly `dddd-dd-dd`. chrono alone would also take padding, a year
    /// sign and one-digit fields.
    fn has_day_shape(raw: &str) -> bool {
        let bytes = raw.as_bytes();
        bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
    }
}

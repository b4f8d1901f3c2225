use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::{Event, Impact};
use super::price::{PricePoint, PriceSummary};
use super::time_range::TimeRange;

/// Semantic color for chart annotations. The frontend maps these to
/// concrete platform colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hue {
    Green,
    Red,
    Yellow,
    Orange,
}

/// An event annotation placed on the price line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMarker {
    pub event: Event,

    /// Price on the event's day in the visible series; None when the
    /// series has no point on that day (renderer draws it at the baseline).
    pub price: Option<f64>,

    pub hue: Hue,
}

/// Payload for the detail panel of the selected event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetail {
    pub name: String,
    pub date: NaiveDate,
    pub impact: Impact,
    pub impact_label: String,
    pub hue: Hue,
    pub news_example: String,
}

impl From<&Event> for EventDetail {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            date: event.date,
            impact: event.impact,
            impact_label: event.impact.label().to_string(),
            hue: event.impact.detail_hue(),
            news_example: event.news_example.clone(),
        }
    }
}

/// One button of the range selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeOption {
    pub range: TimeRange,
    pub label: String,
    pub selected: bool,
}

/// Everything the presentation layer needs for one render pass.
///
/// The core computes all of it; the frontend only draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub today: NaiveDate,
    pub points: Vec<PricePoint>,
    pub markers: Vec<EventMarker>,
    pub ranges: Vec<RangeOption>,
    pub selected_range: TimeRange,
    pub detail: Option<EventDetail>,
    pub summary: Option<PriceSummary>,
    pub is_simulating: bool,
}

use chrono::NaiveDate;

use crate::models::chart::{EventMarker, RangeOption};
use crate::models::event::Event;
use crate::models::price::PricePoint;
use crate::models::time_range::TimeRange;

/// Derives the visible chart data from the full series and event list.
///
/// Every function expects `series` to be date-ordered, one point per day,
/// as produced by `PriceService`.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Points with `date >= range.cutoff(today)`, as a contiguous suffix.
    /// `TimeRange::All` returns the input unchanged.
    pub fn filter_by_range<'a>(
        &self,
        series: &'a [PricePoint],
        range: TimeRange,
        today: NaiveDate,
    ) -> &'a [PricePoint] {
        let Some(cutoff) = range.cutoff(today) else {
            return series;
        };
        // First entry >= cutoff
        let start = series.partition_point(|p| p.date < cutoff);
        &series[start..]
    }

    /// Events whose date lies inside the inclusive span of `filtered`.
    ///
    /// An empty `filtered` series shows no events at all. Input order is kept.
    pub fn filter_events_to_window<'a>(
        &self,
        events: &'a [Event],
        filtered: &[PricePoint],
    ) -> Vec<&'a Event> {
        let (Some(first), Some(last)) = (filtered.first(), filtered.last()) else {
            return Vec::new();
        };
        let (min_date, max_date) = (first.date, last.date);
        events
            .iter()
            .filter(|e| e.date >= min_date && e.date <= max_date)
            .collect()
    }

    /// Price of the point on `date`, if the series has one. Uses binary search.
    pub fn price_at_date(&self, series: &[PricePoint], date: NaiveDate) -> Option<f64> {
        series
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|idx| series[idx].price)
    }

    /// Marker annotations for the events visible in `filtered`.
    pub fn build_markers(&self, events: &[Event], filtered: &[PricePoint]) -> Vec<EventMarker> {
        self.filter_events_to_window(events, filtered)
            .into_iter()
            .map(|event| EventMarker {
                event: event.clone(),
                price: self.price_at_date(filtered, event.date),
                hue: event.impact.marker_hue(),
            })
            .collect()
    }

    /// The six selector buttons in display order.
    pub fn range_options(&self, selected: TimeRange) -> Vec<RangeOption> {
        TimeRange::ALL_RANGES
            .into_iter()
            .map(|range| RangeOption {
                range,
                label: range.label().to_string(),
                selected: range == selected,
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

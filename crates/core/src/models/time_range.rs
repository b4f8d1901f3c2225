use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Visible window of the price chart, as offered by the range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[default]
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "ALL")]
    All,
}

impl TimeRange {
    /// All ranges in selector order.
    pub const ALL_RANGES: [TimeRange; 6] = [
        TimeRange::OneDay,
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::OneYear,
        TimeRange::All,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1D",
            TimeRange::OneWeek => "1W",
            TimeRange::OneMonth => "1M",
            TimeRange::ThreeMonths => "3M",
            TimeRange::OneYear => "1Y",
            TimeRange::All => "ALL",
        }
    }

    /// First day included in this range, or None for `All` (no cutoff).
    ///
    /// Month and year offsets are calendar-aware: stepping back from a day
    /// that does not exist in the target month lands on that month's last day
    /// (2024-03-31 minus 1M is 2024-02-29).
    pub fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        let cutoff = match self {
            TimeRange::OneDay => today.checked_sub_days(Days::new(1)),
            TimeRange::OneWeek => today.checked_sub_days(Days::new(7)),
            TimeRange::OneMonth => today.checked_sub_months(Months::new(1)),
            TimeRange::ThreeMonths => today.checked_sub_months(Months::new(3)),
            TimeRange::OneYear => today.checked_sub_months(Months::new(12)),
            TimeRange::All => return None,
        };
        // Underflow only happens near NaiveDate::MIN; everything is then in range.
        Some(cutoff.unwrap_or(NaiveDate::MIN))
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TimeRange {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        TimeRange::ALL_RANGES
            .into_iter()
            .find(|r| r.label() == upper)
            .ok_or_else(|| CoreError::InvalidSettings(format!("Unknown time range: {s}")))
    }
}

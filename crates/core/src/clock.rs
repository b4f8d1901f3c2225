use chrono::{NaiveDate, Utc};

/// Source of "today" for generation and filtering.
///
/// Swapped for a [`FixedClock`] in tests so cutoffs are reproducible.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, day granularity in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

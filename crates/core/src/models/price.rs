use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day of the mocked price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unique identifier, generated per point
    pub id: Uuid,

    pub date: NaiveDate,

    /// USD price, always inside the generator's clamp bounds
    pub price: f64,

    /// Mock traded volume, unrelated to price
    pub volume: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64, volume: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            price,
            volume,
        }
    }
}

/// Header figures: latest price and the change against the previous day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub latest_date: NaiveDate,
    pub latest_price: f64,

    /// `latest_price - previous_price`
    pub change: f64,

    /// Change as a percentage of the previous price (e.g., 2.34 for +2.34%)
    pub change_percent: f64,
}

impl PriceSummary {
    /// Compute from the last two points of a date-ordered series.
    /// Returns None when fewer than two points exist.
    pub fn from_series(series: &[PricePoint]) -> Option<Self> {
        let [.., previous, latest] = series else {
            return None;
        };
        let change = latest.price - previous.price;
        let change_percent = if previous.price.abs() > f64::EPSILON {
            change / previous.price * 100.0
        } else {
            0.0
        };
        Some(Self {
            latest_date: latest.date,
            latest_price: latest.price,
            change,
            change_percent,
        })
    }

    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }
}

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::time_range::TimeRange;

/// How a bad record inside an events document is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecodeMode {
    /// One bad record fails the whole document (no events at all).
    #[default]
    Strict,
    /// Bad records are logged and skipped; the rest still load.
    SkipInvalid,
}

/// Parameters of the mocked random-walk price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Price of the first (oldest) point
    pub start_price: f64,

    /// Lower clamp bound for every price
    pub min_price: f64,

    /// Upper clamp bound for every price
    pub max_price: f64,

    /// Daily delta is drawn uniformly from [-max_daily_change, max_daily_change]
    pub max_daily_change: f64,

    /// Volume is drawn uniformly from [volume_min, volume_max)
    pub volume_min: f64,
    pub volume_max: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_price: 1500.0,
            min_price: 1000.0,
            max_price: 4000.0,
            max_daily_change: 50.0,
            volume_min: 1000.0,
            volume_max: 10000.0,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        let all_finite = [
            self.start_price,
            self.min_price,
            self.max_price,
            self.max_daily_change,
            self.volume_min,
            self.volume_max,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(CoreError::InvalidSettings(
                "generator values must be finite".into(),
            ));
        }
        if self.min_price <= 0.0 || self.min_price > self.max_price {
            return Err(CoreError::InvalidSettings(format!(
                "price bounds must satisfy 0 < min ({}) <= max ({})",
                self.min_price, self.max_price
            )));
        }
        if self.start_price < self.min_price || self.start_price > self.max_price {
            return Err(CoreError::InvalidSettings(format!(
                "start price {} outside [{}, {}]",
                self.start_price, self.min_price, self.max_price
            )));
        }
        if self.max_daily_change < 0.0 {
            return Err(CoreError::InvalidSettings(format!(
                "max daily change must not be negative, got {}",
                self.max_daily_change
            )));
        }
        if self.volume_min >= self.volume_max {
            return Err(CoreError::InvalidSettings(format!(
                "volume range [{}, {}) is empty",
                self.volume_min, self.volume_max
            )));
        }
        Ok(())
    }
}

/// Application-level configuration for the chart core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorConfig,

    /// Range selected when the chart first opens
    pub default_range: TimeRange,

    pub decode_mode: DecodeMode,
}

impl Settings {
    /// Parse settings from JSON. Missing fields fall back to defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_slice(bytes)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.generator.validate()
    }
}

use chrono::{Months, NaiveDate};
use rand::Rng;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::price::PricePoint;
use crate::models::settings::GeneratorConfig;

/// Generates the mocked daily price series (bounded random walk).
///
/// No I/O and no clock of its own: callers pass "today" and the random
/// source, so a seeded RNG replays the exact same series.
pub struct PriceService {
    config: GeneratorConfig,
}

impl PriceService {
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Create a generator with custom parameters (validated).
    pub fn with_config(config: GeneratorConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate one point per day from exactly one calendar year before
    /// `today` through `today`, inclusive.
    pub fn generate<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> Vec<PricePoint> {
        let from = today
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN);
        self.generate_range(from, today, rng)
    }

    /// Random walk over `[from, to]`, one point per calendar day.
    ///
    /// The first point carries the configured start price; every later
    /// price is the previous one plus a uniform delta, clamped to the
    /// configured bounds. Returns an empty series when `from > to`.
    pub fn generate_range<R: Rng + ?Sized>(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        rng: &mut R,
    ) -> Vec<PricePoint> {
        let cfg = &self.config;
        let capacity = usize::try_from((to - from).num_days() + 1).unwrap_or(0);
        let mut series = Vec::with_capacity(capacity);
        let mut current_date = from;
        let mut current_price = cfg.start_price.clamp(cfg.min_price, cfg.max_price);

        while current_date <= to {
            if !series.is_empty() {
                let delta = rng.gen_range(-cfg.max_daily_change..=cfg.max_daily_change);
                current_price = (current_price + delta).clamp(cfg.min_price, cfg.max_price);
            }
            let volume = rng.gen_range(cfg.volume_min..cfg.volume_max);
            series.push(PricePoint::new(current_date, current_price, volume));

            current_date = match current_date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        debug!("Generated {} price points ({from} → {to})", series.len());
        series
    }
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new()
    }
}

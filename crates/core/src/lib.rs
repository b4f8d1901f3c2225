pub mod clock;
pub mod errors;
pub mod models;
pub mod observer;
pub mod services;

use std::path::Path;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;
use uuid::Uuid;

use clock::{Clock, SystemClock};
use errors::CoreError;
use models::{
    chart::{ChartSnapshot, EventDetail, EventMarker},
    event::Event,
    price::{PricePoint, PriceSummary},
    settings::Settings,
    time_range::TimeRange,
};
use observer::{Listeners, StateChange, SubscriptionId};
use services::{
    chart_service::ChartService, event_service::EventService, price_service::PriceService,
};

/// Main entry point for the chart core: the single owner of all view state.
///
/// Holds the loaded events, the generated price series, the selected range,
/// the selected event and the simulation flag. Every mutation notifies
/// subscribers synchronously; derived views are recomputed on each call.
#[must_use]
pub struct PriceChart {
    events: Vec<Event>,
    price_data: Vec<PricePoint>,
    selected_range: TimeRange,
    selected_event: Option<Event>,
    is_simulating: bool,
    event_service: EventService,
    price_service: PriceService,
    chart_service: ChartService,
    clock: Box<dyn Clock>,
    rng: Box<dyn RngCore>,
    listeners: Listeners,
}

impl std::fmt::Debug for PriceChart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceChart")
            .field("events", &self.events.len())
            .field("price_points", &self.price_data.len())
            .field("selected_range", &self.selected_range)
            .field("selected_event", &self.selected_event.as_ref().map(|e| e.id))
            .field("is_simulating", &self.is_simulating)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PriceChart {
    /// Default chart: wall clock, entropy-seeded RNG, bundled events loaded
    /// and a fresh year of prices generated.
    pub fn new() -> Self {
        let mut chart = Self::build(
            &Settings::default(),
            PriceService::new(),
            Box::new(SystemClock),
            Box::new(StdRng::from_entropy()),
        );
        chart.load_bundled_events();
        chart
    }

    /// Chart with injected settings, clock and random source. No events are
    /// loaded; the price series is generated immediately.
    pub fn with_parts(
        settings: Settings,
        clock: Box<dyn Clock>,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let price_service = PriceService::with_config(settings.generator.clone())?;
        Ok(Self::build(&settings, price_service, clock, rng))
    }

    /// Deterministic chart for a fixed day and seed (tests, previews).
    pub fn seeded(today: NaiveDate, seed: u64) -> Self {
        Self::build(
            &Settings::default(),
            PriceService::new(),
            Box::new(clock::FixedClock(today)),
            Box::new(StdRng::seed_from_u64(seed)),
        )
    }

    /// `price_service` must already carry the (validated) generator config.
    fn build(
        settings: &Settings,
        price_service: PriceService,
        clock: Box<dyn Clock>,
        mut rng: Box<dyn RngCore>,
    ) -> Self {
        let price_data = price_service.generate(clock.today(), &mut *rng);
        Self {
            events: Vec::new(),
            price_data,
            selected_range: settings.default_range,
            selected_event: None,
            is_simulating: false,
            event_service: EventService::with_mode(settings.decode_mode),
            price_service,
            chart_service: ChartService::new(),
            clock,
            rng,
            listeners: Listeners::default(),
        }
    }

    // ── Observers ───────────────────────────────────────────────────

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&mut self, change: StateChange) {
        self.listeners.notify(&change);
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Replace the event list from a JSON document.
    /// Failures are logged and leave the chart with no events.
    /// Returns the number of events now loaded.
    pub fn load_events_from_bytes(&mut self, bytes: &[u8]) -> usize {
        let events = self.event_service.load(bytes);
        self.replace_events(events)
    }

    /// Replace the event list from a file. A missing file leaves no events.
    pub fn load_events_from_file(&mut self, path: impl AsRef<Path>) -> usize {
        let events = self.event_service.load_file(path);
        self.replace_events(events)
    }

    /// Replace the event list with the document compiled into the library.
    pub fn load_bundled_events(&mut self) -> usize {
        let events = self.event_service.load_bundled();
        self.replace_events(events)
    }

    /// Replace the event list directly. The current selection is kept.
    pub fn replace_events(&mut self, events: Vec<Event>) -> usize {
        let count = events.len();
        self.events = events;
        self.notify(StateChange::EventsLoaded(count));
        count
    }

    /// Discard the series and generate a new year ending today.
    pub fn regenerate_prices(&mut self) -> usize {
        let today = self.clock.today();
        self.price_data = self.price_service.generate(today, &mut *self.rng);
        let count = self.price_data.len();
        info!("Regenerated price series: {count} points ending {today}");
        self.notify(StateChange::PricesRegenerated(count));
        count
    }

    // ── Intents ─────────────────────────────────────────────────────

    pub fn select_range(&mut self, range: TimeRange) {
        self.selected_range = range;
        self.notify(StateChange::RangeSelected(range));
    }

    /// Replace the current selection. The event does not have to be inside
    /// the visible window, and narrowing the range later does not clear it.
    pub fn select_event(&mut self, event: Event) {
        let id = event.id;
        self.selected_event = Some(event);
        self.notify(StateChange::EventSelected(Some(id)));
    }

    /// Select a loaded event by id. Returns false (selection unchanged) if
    /// no loaded event has that id.
    pub fn select_event_by_id(&mut self, id: Uuid) -> bool {
        match self.events.iter().find(|e| e.id == id).cloned() {
            Some(event) => {
                self.select_event(event);
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_event = None;
        self.notify(StateChange::EventSelected(None));
    }

    /// Flip the simulation flag. Placeholder for a live feed: price and
    /// event data are untouched.
    pub fn toggle_simulation(&mut self) {
        self.is_simulating = !self.is_simulating;
        let flag = self.is_simulating;
        self.notify(StateChange::SimulationToggled(flag));
    }

    // ── Read access ─────────────────────────────────────────────────

    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn price_data(&self) -> &[PricePoint] {
        &self.price_data
    }

    #[must_use]
    pub fn selected_range(&self) -> TimeRange {
        self.selected_range
    }

    #[must_use]
    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_event.as_ref()
    }

    #[must_use]
    pub fn is_simulating(&self) -> bool {
        self.is_simulating
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Price points visible in the selected range.
    #[must_use]
    pub fn filtered_price_data(&self) -> &[PricePoint] {
        self.chart_service
            .filter_by_range(&self.price_data, self.selected_range, self.clock.today())
    }

    /// Events inside the visible price window.
    #[must_use]
    pub fn filtered_events(&self) -> Vec<&Event> {
        self.chart_service
            .filter_events_to_window(&self.events, self.filtered_price_data())
    }

    #[must_use]
    pub fn markers(&self) -> Vec<EventMarker> {
        self.chart_service
            .build_markers(&self.events, self.filtered_price_data())
    }

    #[must_use]
    pub fn event_detail(&self) -> Option<EventDetail> {
        self.selected_event.as_ref().map(EventDetail::from)
    }

    /// Latest price and day-over-day change of the full series.
    #[must_use]
    pub fn price_summary(&self) -> Option<PriceSummary> {
        PriceSummary::from_series(&self.price_data)
    }

    /// Everything the renderer needs, computed in one pass.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let today = self.clock.today();
        let points = self
            .chart_service
            .filter_by_range(&self.price_data, self.selected_range, today);
        ChartSnapshot {
            today,
            points: points.to_vec(),
            markers: self.chart_service.build_markers(&self.events, points),
            ranges: self.chart_service.range_options(self.selected_range),
            selected_range: self.selected_range,
            detail: self.event_detail(),
            summary: self.price_summary(),
            is_simulating: self.is_simulating,
        }
    }
}

impl Default for PriceChart {
    fn default() -> Self {
        Self::new()
    }
}

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::event::{Event, EventsData};
use crate::models::settings::DecodeMode;

/// The curated events document compiled into the library.
pub const BUNDLED_EVENTS: &str = include_str!("../../data/events.json");

/// Document shape with records kept undecoded, for per-record isolation.
#[derive(Deserialize)]
struct RawEventsData {
    past_events: Vec<serde_json::Value>,
    upcoming_events: Vec<serde_json::Value>,
}

/// Decodes curated event documents into typed events.
///
/// Pure business logic plus one file read. The fallible `parse*` /
/// `read_file` functions report errors; the `load*` functions are the
/// non-fatal boundary and degrade to an empty list with a log line.
pub struct EventService {
    mode: DecodeMode,
}

impl EventService {
    pub fn new() -> Self {
        Self::with_mode(DecodeMode::default())
    }

    pub fn with_mode(mode: DecodeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Decode a whole document. Any bad record (unparseable date, unknown
    /// impact, missing field) fails the entire decode.
    ///
    /// Returns past events followed by upcoming events.
    pub fn parse(bytes: &[u8]) -> Result<Vec<Event>, CoreError> {
        let data: EventsData = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Deserialization(format!("Failed to decode events: {e}")))?;
        Ok(data.into_events())
    }

    /// Decode a document, skipping records that fail on their own.
    ///
    /// The top-level shape must still be valid: malformed JSON or a missing
    /// `past_events` / `upcoming_events` array is an error.
    pub fn parse_lenient(bytes: &[u8]) -> Result<Vec<Event>, CoreError> {
        let raw: RawEventsData = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Deserialization(format!("Failed to decode events: {e}")))?;

        let past = raw.past_events.into_iter().map(|v| ("past_events", v));
        let upcoming = raw.upcoming_events.into_iter().map(|v| ("upcoming_events", v));

        let mut events = Vec::new();
        for (idx, (group, value)) in past.chain(upcoming).enumerate() {
            match serde_json::from_value::<Event>(value) {
                Ok(event) => events.push(event),
                Err(e) => warn!("Skipping event #{idx} in {group}: {e}"),
            }
        }
        Ok(events)
    }

    /// Decode with this service's [`DecodeMode`].
    pub fn parse_with_mode(&self, bytes: &[u8]) -> Result<Vec<Event>, CoreError> {
        match self.mode {
            DecodeMode::Strict => Self::parse(bytes),
            DecodeMode::SkipInvalid => Self::parse_lenient(bytes),
        }
    }

    /// Read and decode an events file from disk.
    /// A missing file yields `CoreError::ResourceNotFound`.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Vec<Event>, CoreError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                CoreError::ResourceNotFound(format!("Failed to find {}", path.display()))
            }
            _ => CoreError::FileIO(format!("Failed to read {}: {e}", path.display())),
        })?;
        self.parse_with_mode(&bytes)
    }

    /// Non-fatal decode: on any failure, log it and return no events.
    pub fn load(&self, bytes: &[u8]) -> Vec<Event> {
        match self.parse_with_mode(bytes) {
            Ok(events) => {
                debug!("Decoded {} events", events.len());
                events
            }
            Err(e) => {
                warn!("Error decoding events: {e}");
                Vec::new()
            }
        }
    }

    /// Non-fatal file load: a missing or unreadable file yields no events.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Vec<Event> {
        let path = path.as_ref();
        match self.read_file(path) {
            Ok(events) => {
                info!("Loaded {} events from {}", events.len(), path.display());
                events
            }
            Err(e) => {
                warn!("Error loading events: {e}");
                Vec::new()
            }
        }
    }

    /// Non-fatal decode of the bundled document.
    pub fn load_bundled(&self) -> Vec<Event> {
        self.load(BUNDLED_EVENTS.as_bytes())
    }
}

impl Default for EventService {
    fn default() -> Self {
        Self::new()
    }
}

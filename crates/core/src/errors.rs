use thiserror::Error;

/// Unified error type for the entire eth-event-chart-core library.
///
/// None of these escape to the presentation layer: the load boundary
/// (`EventService::load*`, `PriceChart::load_events*`) logs them and
/// degrades to an empty event list.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Resource / File ─────────────────────────────────────────────
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Decoding ────────────────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::ResourceNotFound(e.to_string()),
            _ => CoreError::FileIO(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

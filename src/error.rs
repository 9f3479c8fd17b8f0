use thiserror::Error;

/// Engine error taxonomy.
///
/// An empty leaderboard is deliberately NOT represented here: computing a
/// ranking over zero qualifying rows yields an empty `Leaderboard`, which is
/// a valid value. Deliveries whose match id has no match row are silently
/// dropped at join time and surfaced only as a count on the snapshot.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Fatal at setup: malformed alias mapping, duplicate match ids.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A prediction was requested without all required context fields.
    /// Raised before the model is ever invoked.
    #[error("missing context field: {field}")]
    MissingContext { field: &'static str },
}

// ---------------------------------------------------------------------------
// Error types for the coordination engine and traffic ingestion
// ---------------------------------------------------------------------------

use std::fmt;

use serde::Serialize;

/// Errors surfaced by the engine and its data-source collaborators.
///
/// Only `IntersectionNotFound` is absorbed when it happens to a downstream
/// neighbour during coordination. Anything else is propagated to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum EngineError {
    /// The requested intersection is unknown to the topology provider.
    IntersectionNotFound(String),
    /// The backing store failed to answer a query.
    Backend(String),
}

impl EngineError {
    pub fn not_found(id: impl Into<String>) -> Self {
        EngineError::IntersectionNotFound(id.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::IntersectionNotFound(_))
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::IntersectionNotFound(id) => write!(f, "Intersection not found: {id}"),
            EngineError::Backend(msg) => write!(f, "Backend error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Reasons a road traffic update is refused before it reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateRejected {
    EmptyRoadId,
    EmptyTimestamp,
    /// Not an ISO 8601 date or date-time.
    InvalidTimestamp(String),
    NegativeSpeed(f64),
    NonFiniteSpeed,
}

impl fmt::Display for UpdateRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateRejected::EmptyRoadId => write!(f, "road_id must not be empty"),
            UpdateRejected::EmptyTimestamp => write!(f, "timestamp must not be empty"),
            UpdateRejected::InvalidTimestamp(ts) => {
                write!(f, "Invalid timestamp: must be ISO 8601 format, got {ts:?}")
            }
            UpdateRejected::NegativeSpeed(speed) => {
                write!(f, "avg_speed must be >= 0, got {speed}")
            }
            UpdateRejected::NonFiniteSpeed => write!(f, "avg_speed must be a finite number"),
        }
    }
}

impl std::error::Error for UpdateRejected {}

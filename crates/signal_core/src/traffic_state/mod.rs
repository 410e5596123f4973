//! Per-road traffic measurements: one current observation per road, last
//! write wins. The engine reads them through [`TrafficStateStore`] and never
//! writes.

mod store;
mod types;

pub use store::{TrafficStateStore, TrafficStateTable, UpsertOutcome};
pub use types::{is_iso8601, Observation, RoadTrafficUpdate};

//! Per-intersection load aggregation over incoming roads.
//!
//! `load_score = total_queue + total_vehicles`, summed over incoming roads that
//! have an observation. Roads without one are skipped and do not count toward
//! the average-speed denominator.

mod snapshot;
#[cfg(test)]
mod tests;

pub use snapshot::{snapshot, LoadSnapshot};

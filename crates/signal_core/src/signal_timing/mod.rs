//! Graph-safe signal timing.
//!
//! - Base green is extended by congestion level.
//! - A blocked downstream forces minimum green to avoid spillback.
//! - Green is clamped to `[min_green, max_green]`; red fills the rest of the cycle.

mod timing;

pub use timing::{compute_timing, SignalTiming};

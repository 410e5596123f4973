//! Which axis (X or Z) currently has right-of-way at each intersection.
//!
//! Entries are created as `X` on first observation and live for the lifetime of
//! the [`PhaseStates`] container. Only the coordination engine overwrites them.

mod axis;
mod states;

pub use axis::Axis;
pub use states::{PhaseRead, PhaseStates, PhaseStatesHandle};

//! Multi-intersection signal coordination (green wave).
//!
//! Each node's active axis is resolved from its downstream neighbours' states,
//! which are themselves resolved recursively one hop at a time. A node that is
//! already on the current traversal path (a cycle), or that sits at the depth
//! limit, gets a local-only decision: congestion, timing and its stored axis,
//! with no further recursion and no rules applied.
//!
//! Rules, first match wins, in downstream discovery order:
//! 1. `DOWNSTREAM_BLOCKED`: adopt the axis of the first neighbour that is itself
//!    downstream blocked.
//! 2. `GREEN_WAVE_ALIGNMENT`: adopt the axis of the first neighbour with one.
//! 3. `LOCAL_DEFAULT`: keep the node's own axis.

mod engine;
mod path;
mod rules;
mod types;

pub use engine::{CoordinationEngine, NeighborOutcome};
pub use path::VisitPath;
pub use rules::resolve_axis;
pub use types::{
    AxisResolution, CoordinationOutcome, CoordinationReason, DownstreamState, SignalDecision,
};

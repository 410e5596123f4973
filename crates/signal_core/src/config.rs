/// Load score below this is LOW.
pub const LOAD_LOW_MAX: u64 = 10;
/// Load score below this (and at least `LOAD_LOW_MAX`) is MEDIUM. Anything at or
/// above it is HIGH.
pub const LOAD_MEDIUM_MAX: u64 = 30;

pub const BASE_GREEN_TIME: u32 = 30;
pub const MIN_GREEN_TIME: u32 = 15;
pub const MAX_GREEN_TIME: u32 = 60;
pub const CYCLE_TIME: u32 = 90;

/// Extra green (seconds) per congestion level, applied before clamping.
pub const EXTENSION_LOW: u32 = 0;
pub const EXTENSION_MEDIUM: u32 = 10;
pub const EXTENSION_HIGH: u32 = 20;

/// Nodes reached at this traversal depth are resolved local-only, the same way a
/// repeated node is. Bounds recursion on long acyclic chains and the number of
/// paths walked through dense grids.
pub const MAX_COORDINATION_DEPTH: usize = 8;

/// Downstream entries recursed into per node. Classification still sees every
/// outgoing road.
pub const MAX_COORDINATION_FAN_OUT: usize = 16;

/// Maximum number of decision tasks spawned per update.
pub const MAX_DISPATCH_PER_TICK: usize = 256;

/// Distance between neighbouring intersections in a seeded grid.
pub const DEFAULT_GRID_SPACING: f64 = 20.0;

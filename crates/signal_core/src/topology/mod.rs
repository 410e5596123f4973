//! Road topology: intersections (nodes) and directed roads (edges).
//!
//! The engine only reads topology through [`TopologyProvider`]. The in-memory
//! [`RoadNetworkStore`] is the provider used by the plugin, the agent binary and
//! the tests.

mod provider;
mod seed;
mod store;
#[cfg(test)]
mod tests;
mod types;

pub use provider::TopologyProvider;
pub use seed::{grid_intersection_id, seed_grid, SeedSummary};
pub use store::RoadNetworkStore;
pub use types::{road_id_for, Intersection, IntersectionId, Position, Road, RoadId};

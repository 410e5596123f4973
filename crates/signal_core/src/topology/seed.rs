//! Grid topology fixture: a `rows x cols` lattice of intersections with two
//! directed roads (one per direction) between every pair of neighbours.

use bevy::prelude::*;
use serde::Serialize;

use super::store::RoadNetworkStore;
use super::types::{Intersection, IntersectionId, Road};

/// Counts reported after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub intersections: usize,
    pub roads: usize,
}

/// Id of the intersection at grid cell `(row, col)`, e.g. `I01`. Cells with a
/// two-digit coordinate use a separator (`I3_12`) so ids stay unique.
pub fn grid_intersection_id(row: usize, col: usize) -> IntersectionId {
    if row < 10 && col < 10 {
        IntersectionId(format!("I{row}{col}"))
    } else {
        IntersectionId(format!("I{row}_{col}"))
    }
}

/// Replace the contents of `store` with a grid. Row index maps to `lat` (Z) and
/// column index to `lng` (X), both scaled by `spacing`; every road is
/// `spacing` long.
pub fn seed_grid(
    store: &mut RoadNetworkStore,
    rows: usize,
    cols: usize,
    spacing: f64,
) -> SeedSummary {
    store.clear();

    for r in 0..rows {
        for c in 0..cols {
            let id = grid_intersection_id(r, c);
            let name = format!("Intersection {id}");
            store.upsert_intersection(
                Intersection::new(id)
                    .with_name(name)
                    .with_position(r as f64 * spacing, c as f64 * spacing),
            );
        }
    }

    let mut add_pair = |a: IntersectionId, b: IntersectionId| {
        store.add_road(Road::between(a.clone(), b.clone()).with_length(spacing));
        store.add_road(Road::between(b, a).with_length(spacing));
    };

    // West <-> East
    for r in 0..rows {
        for c in 0..cols.saturating_sub(1) {
            add_pair(grid_intersection_id(r, c), grid_intersection_id(r, c + 1));
        }
    }
    // North <-> South
    for c in 0..cols {
        for r in 0..rows.saturating_sub(1) {
            add_pair(grid_intersection_id(r, c), grid_intersection_id(r + 1, c));
        }
    }

    let summary = SeedSummary {
        intersections: store.intersection_count(),
        roads: store.road_count(),
    };
    info!(
        "Topology seeded: {} intersections, {} roads ({}x{} grid)",
        summary.intersections, summary.roads, rows, cols
    );
    summary
}

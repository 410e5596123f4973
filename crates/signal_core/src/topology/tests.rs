use super::*;

fn diamond() -> RoadNetworkStore {
    let mut store = RoadNetworkStore::new();
    for id in ["A", "B", "C", "D"] {
        store.upsert_intersection(Intersection::new(id));
    }
    store.add_road(Road::between("A", "B"));
    store.add_road(Road::between("A", "C"));
    store.add_road(Road::between("B", "D"));
    store.add_road(Road::between("C", "D"));
    store
}

#[test]
fn test_road_id_convention() {
    assert_eq!(road_id_for("I00", "I01"), RoadId::new("I00->I01"));
    let road = Road::between("X1", "X2");
    assert_eq!(road.id.as_str(), "X1->X2");
}

#[test]
fn test_outgoing_and_incoming_preserve_insertion_order() {
    let store = diamond();
    let out: Vec<_> = store
        .outgoing_roads("A")
        .unwrap()
        .into_iter()
        .map(|r| r.to)
        .collect();
    assert_eq!(out, vec![IntersectionId::new("B"), IntersectionId::new("C")]);

    let incoming: Vec<_> = store
        .incoming_roads("D")
        .unwrap()
        .into_iter()
        .map(|r| r.from)
        .collect();
    assert_eq!(incoming, vec![IntersectionId::new("B"), IntersectionId::new("C")]);
}

#[test]
fn test_unknown_intersection_has_no_edges_and_is_absent() {
    let store = diamond();
    assert!(store.get_intersection("Z").unwrap().is_none());
    assert!(store.outgoing_roads("Z").unwrap().is_empty());
    assert!(!store.contains_intersection("Z").unwrap());
}

#[test]
fn test_checked_edge_queries_report_not_found() {
    let store = diamond();
    assert_eq!(
        store.outgoing_checked("nope"),
        Err(crate::error::EngineError::not_found("nope"))
    );
    assert!(store.incoming_checked("nope").unwrap_err().is_not_found());
    assert_eq!(store.incoming_checked("A").unwrap().len(), 0);
}

#[test]
fn test_parallel_roads_are_kept() {
    let mut store = diamond();
    store.add_road(Road::between("A", "B").with_id("A->B#2"));
    let targets: Vec<_> = store
        .outgoing_roads("A")
        .unwrap()
        .into_iter()
        .map(|r| r.to.0)
        .collect();
    assert_eq!(targets, vec!["B", "C", "B"]);
}

#[test]
fn test_upsert_intersection_replaces_without_reordering() {
    let mut store = diamond();
    store.upsert_intersection(Intersection::new("A").with_name("Main & 1st"));
    assert_eq!(store.intersection_count(), 4);
    let first = store.intersections().next().unwrap();
    assert_eq!(first.id.as_str(), "A");
    assert_eq!(first.name.as_deref(), Some("Main & 1st"));
}

#[test]
fn test_self_loop_is_both_incoming_and_outgoing() {
    let mut store = RoadNetworkStore::new();
    store.upsert_intersection(Intersection::new("S"));
    store.add_road(Road::between("S", "S"));
    assert_eq!(store.roads()[0].from, store.roads()[0].to);
    assert_eq!(store.outgoing_roads("S").unwrap().len(), 1);
    assert_eq!(store.incoming_roads("S").unwrap().len(), 1);
}

// ====================================================================
// Grid seeding
// ====================================================================

#[test]
fn test_seed_grid_3x3_counts() {
    let mut store = RoadNetworkStore::new();
    let summary = seed_grid(&mut store, 3, 3, 20.0);
    assert_eq!(summary.intersections, 9);
    // 3 rows * 2 horizontal pairs + 3 cols * 2 vertical pairs, two directions each
    assert_eq!(summary.roads, 24);
}

#[test]
fn test_seed_grid_positions_and_names() {
    let mut store = RoadNetworkStore::new();
    seed_grid(&mut store, 3, 3, 20.0);
    let i12 = store.intersection("I12").unwrap();
    assert_eq!(i12.name.as_deref(), Some("Intersection I12"));
    let pos = i12.position.unwrap();
    assert!((pos.lat - 20.0).abs() < f64::EPSILON);
    assert!((pos.lng - 40.0).abs() < f64::EPSILON);
}

#[test]
fn test_seed_grid_corner_and_center_degree() {
    let mut store = RoadNetworkStore::new();
    seed_grid(&mut store, 3, 3, 20.0);
    assert_eq!(store.outgoing_roads("I00").unwrap().len(), 2);
    assert_eq!(store.outgoing_roads("I11").unwrap().len(), 4);
    assert_eq!(store.incoming_roads("I11").unwrap().len(), 4);
    let road = &store.outgoing_roads("I00").unwrap()[0];
    assert_eq!(road.id.as_str(), "I00->I01");
    assert_eq!(road.length_m, Some(20.0));
}

#[test]
fn test_seed_grid_is_idempotent() {
    let mut store = RoadNetworkStore::new();
    seed_grid(&mut store, 3, 3, 20.0);
    let again = seed_grid(&mut store, 3, 3, 20.0);
    assert_eq!(again.roads, 24);
    assert_eq!(store.road_count(), 24);
}

#[test]
fn test_grid_ids_stay_unique_past_ten() {
    assert_eq!(grid_intersection_id(1, 1).as_str(), "I11");
    assert_ne!(grid_intersection_id(1, 10), grid_intersection_id(11, 0));
    let mut store = RoadNetworkStore::new();
    let summary = seed_grid(&mut store, 12, 12, 20.0);
    assert_eq!(summary.intersections, 144);
}

#[test]
fn test_intersection_wire_shape() {
    let json = serde_json::to_value(Intersection::new("I00").with_position(0.0, 20.0)).unwrap();
    assert_eq!(json["intersection_id"], "I00");
    assert_eq!(json["position"]["lng"], 20.0);
    assert!(json.get("name").is_none());

    let road: Road =
        serde_json::from_str(r#"{"road_id":"r1","from":"A","to":"B","length_m":100.0}"#).unwrap();
    assert_eq!(road.id.as_str(), "r1");
    assert_eq!(road.to.as_str(), "B");
}

use crate::error::EngineError;
use crate::network::NetworkSnapshot;

use super::*;

fn two_feeders() -> NetworkSnapshot {
    NetworkSnapshot::default()
        .with_intersections(["A", "B", "C"])
        .with_road("A", "C")
        .with_road("B", "C")
}

#[test]
fn test_two_incoming_roads_scenario() {
    let net = two_feeders()
        .with_observation("A", "C", 5, 3, 20.0)
        .with_observation("B", "C", 2, 1, 10.0);
    let snap = snapshot(&net, "C").unwrap();
    assert_eq!(snap.total_queue, 7);
    assert_eq!(snap.total_vehicles, 4);
    assert_eq!(snap.load_score, 11);
    assert_eq!(snap.roads_with_data, 2);
    assert!((snap.avg_speed - 15.0).abs() < 1e-9);
}

#[test]
fn test_zero_incoming_roads_is_all_zero() {
    let net = two_feeders();
    let snap = snapshot(&net, "A").unwrap();
    assert_eq!(snap, LoadSnapshot::empty("A".into()));
    assert_eq!(snap.load_score, 0);
    assert_eq!(snap.avg_speed, 0.0);
}

#[test]
fn test_roads_without_data_are_skipped() {
    let net = two_feeders().with_observation("A", "C", 4, 6, 30.0);
    let snap = snapshot(&net, "C").unwrap();
    assert_eq!(snap.incoming_road_ids.len(), 2);
    assert_eq!(snap.roads_with_data, 1);
    assert_eq!(snap.load_score, 10);
    // Only the road with data counts toward the mean
    assert!((snap.avg_speed - 30.0).abs() < 1e-9);
}

#[test]
fn test_incoming_roads_with_no_data_at_all() {
    let snap = snapshot(&two_feeders(), "C").unwrap();
    assert_eq!(snap.roads_with_data, 0);
    assert_eq!(snap.load_score, 0);
    assert_eq!(snap.avg_speed, 0.0);
}

#[test]
fn test_unknown_intersection_is_not_found() {
    assert_eq!(
        snapshot(&two_feeders(), "Q"),
        Err(EngineError::not_found("Q"))
    );
}

#[test]
fn test_load_score_is_a_sum_not_a_mean() {
    let net = NetworkSnapshot::default()
        .with_intersections(["A", "B", "C", "D"])
        .with_road("A", "D")
        .with_road("B", "D")
        .with_road("C", "D")
        .with_observation("A", "D", 10, 10, 5.0)
        .with_observation("B", "D", 10, 10, 5.0)
        .with_observation("C", "D", 10, 10, 5.0);
    assert_eq!(snapshot(&net, "D").unwrap().load_score, 60);
}

#[test]
fn test_wire_form_rounds_avg_speed() {
    let net = NetworkSnapshot::default()
        .with_intersections(["A", "B", "C", "D"])
        .with_road("A", "D")
        .with_road("B", "D")
        .with_road("C", "D")
        .with_observation("A", "D", 0, 1, 10.0)
        .with_observation("B", "D", 0, 1, 10.0)
        .with_observation("C", "D", 0, 1, 12.0);
    let snap = snapshot(&net, "D").unwrap();
    assert!((snap.avg_speed - 32.0 / 3.0).abs() < 1e-12);
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["avg_speed"], 10.67);
    assert_eq!(json["incoming_road_ids"][0], "A->D");
}

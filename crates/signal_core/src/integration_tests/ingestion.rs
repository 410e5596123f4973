use crate::congestion::CongestionLevel;
use crate::test_harness::TestNetwork;
use crate::topology::RoadId;
use crate::traffic_state::RoadTrafficUpdate;

fn update(road: &str, queue: u32, vehicles: u32, speed: f64) -> RoadTrafficUpdate {
    RoadTrafficUpdate {
        road_id: RoadId::new(road),
        timestamp: "2024-01-15T08:30:00Z".into(),
        vehicle_count: vehicles,
        avg_speed: speed,
        queue_length: queue,
    }
}

fn two_roads_into_c() -> TestNetwork {
    TestNetwork::new()
        .with_intersections(["A", "B", "C"])
        .with_road("A", "C")
        .with_road("B", "C")
}

#[test]
fn test_updates_are_applied_on_next_tick() {
    let mut net = two_roads_into_c();
    net.send_update(update("A->C", 5, 3, 20.0));
    net.send_update(update("B->C", 2, 1, 10.0));
    assert!(net.network().traffic().is_empty(), "not applied before a tick");

    net.tick(1);
    assert_eq!(net.network().traffic().len(), 2);

    let outcome = net.decide("C").unwrap();
    assert_eq!(outcome.decision.level, CongestionLevel::Medium, "load 11");
    assert_eq!(outcome.decision.green_time, 40);
}

#[test]
fn test_rejected_updates_never_reach_the_store() {
    let mut net = two_roads_into_c();
    net.send_update(update("A->C", 50, 50, -1.0));
    net.send_update(update("", 50, 50, 10.0));
    net.send_update(update("B->C", 50, 50, f64::NAN));
    net.tick(1);
    assert!(net.network().traffic().is_empty());

    let outcome = net.decide("C").unwrap();
    assert_eq!(outcome.decision.level, CongestionLevel::Low);
}

#[test]
fn test_latest_update_wins() {
    let mut net = two_roads_into_c();
    net.send_update(update("A->C", 40, 0, 1.0));
    net.tick(1);
    assert_eq!(net.decide("C").unwrap().decision.level, CongestionLevel::High);

    net.send_update(update("A->C", 0, 2, 30.0));
    net.tick(1);
    assert_eq!(net.decide("C").unwrap().decision.level, CongestionLevel::Low);
}

#[test]
fn test_update_and_request_in_same_tick_sees_the_update() {
    let mut net = two_roads_into_c();
    net.send_update(update("A->C", 20, 20, 5.0));
    // Ingest runs before Dispatch within one tick.
    let outcome = net.decide("C").unwrap();
    assert_eq!(outcome.decision.level, CongestionLevel::High);
}

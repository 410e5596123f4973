use crate::congestion::CongestionLevel;
use crate::coordination::CoordinationReason;
use crate::error::EngineError;
use crate::phase_state::Axis;
use crate::test_harness::TestNetwork;
use crate::topology::IntersectionId;

#[test]
fn test_two_cycle_with_high_neighbour() {
    let mut net = TestNetwork::new()
        .with_intersections(["A", "B"])
        .with_road("A", "B")
        .with_road("B", "A")
        .with_observation("A", "B", 20, 15, 8.0);

    let a = net.decide("A").unwrap();
    assert_eq!(a.decision.level, CongestionLevel::Medium);
    assert!(a.decision.downstream_blocked);
    assert_eq!(a.decision.green_time, 15);
    assert_eq!(a.decision.red_time, 75);

    let b = net.decide("B").unwrap();
    assert_eq!(b.decision.level, CongestionLevel::High);
    assert!(!b.decision.downstream_blocked, "A is only LOW");
    assert_eq!((b.decision.green_time, b.decision.red_time), (50, 40));
}

#[test]
fn test_blocked_neighbour_on_z_is_adopted() {
    let mut net = TestNetwork::new()
        .with_intersections(["A", "B", "C"])
        .with_road("A", "B")
        .with_road("B", "C")
        .with_observation("B", "C", 25, 10, 4.0)
        .with_phase("C", Axis::Z);

    let outcome = net.decide("A").unwrap();
    let resolution = outcome.resolution.expect("root is always resolved");
    assert_eq!(resolution.axis, Axis::Z);
    assert_eq!(resolution.reason, CoordinationReason::DownstreamBlocked);
    assert_eq!(resolution.inherited_from, Some(IntersectionId::new("B")));
    assert_eq!(net.phase("A"), Some(Axis::Z));
}

#[test]
fn test_unknown_root_reports_not_found() {
    let mut net = TestNetwork::new().with_intersections(["A"]);
    let err = net.decide("Z9").unwrap_err();
    assert_eq!(err, EngineError::not_found("Z9"));
    assert_eq!(net.phase("Z9"), None);
}

#[test]
fn test_self_loop_terminates_through_plugin() {
    let mut net = TestNetwork::new()
        .with_intersections(["A"])
        .with_road("A", "A");
    let outcome = net.decide("A").unwrap();
    assert_eq!(outcome.decision.active_axis, Axis::X);
    assert_eq!(outcome.decision.level, CongestionLevel::Low);
}

#[test]
fn test_every_grid_node_gets_a_decision() {
    let mut net = TestNetwork::new().with_grid(3, 3);
    let ids = net.intersection_ids();
    assert_eq!(ids.len(), 9);

    let tickets: Vec<_> = ids.iter().map(|id| (id.clone(), net.request(id.as_str()))).collect();
    for (id, ticket) in tickets {
        let outcome = net.wait_for(id.as_str(), ticket).unwrap();
        assert_eq!(outcome.decision.intersection_id, id);
        assert_eq!(outcome.decision.level, CongestionLevel::Low);
    }
    for id in &ids {
        assert_eq!(net.phase(id.as_str()), Some(Axis::X), "{id} initialized to X");
    }
}

#[test]
fn test_first_neighbour_wins_on_bidirectional_row() {
    // I00 <-> I01 <-> I02 with I02 preset to Z. I02 is reached with I01 on the
    // path, so it aligns to I01's stored X before I01 itself is resolved.
    let mut net = TestNetwork::new()
        .with_grid(1, 3)
        .with_phase("I02", Axis::Z);

    let outcome = net.decide("I00").unwrap();
    let resolution = outcome.resolution.unwrap();
    assert_eq!(resolution.reason, CoordinationReason::GreenWaveAlignment);
    assert_eq!(resolution.inherited_from, Some(IntersectionId::new("I01")));
    assert_eq!(net.phase("I02"), Some(Axis::X));
}

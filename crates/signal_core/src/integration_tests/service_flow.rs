use std::sync::{Arc, Mutex};

use crate::change_log::CoordinationObserver;
use crate::congestion::CongestionLevel;
use crate::coordination::SignalDecision;
use crate::params::SignalParams;
use crate::service::{DecisionQueue, SignalDecisionRequest};
use crate::test_harness::TestNetwork;
use crate::topology::RoadId;
use crate::traffic_state::RoadTrafficUpdate;

#[derive(Default)]
struct DecisionCollector {
    roots: Mutex<Vec<String>>,
}

impl CoordinationObserver for DecisionCollector {
    fn decision_made(&self, decision: &SignalDecision) {
        self.roots
            .lock()
            .unwrap()
            .push(decision.intersection_id.to_string());
    }
}

#[test]
fn test_request_events_are_queued_and_answered() {
    let mut net = TestNetwork::new().with_intersections(["A", "B"]);
    net.world_mut()
        .send_event(SignalDecisionRequest::new("A"));
    net.world_mut()
        .send_event(SignalDecisionRequest::new("B"));

    for _ in 0..10_000 {
        net.tick(1);
        if net.latest().len() == 2 {
            break;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    assert_eq!(net.latest().len(), 2);

    let ready = net.drain_ready();
    let mut ids: Vec<_> = ready.iter().map(|r| r.intersection_id.to_string()).collect();
    ids.sort();
    assert_eq!(ids, vec!["A", "B"]);
    assert!(ready.iter().all(|r| r.result.is_ok()));
}

#[test]
fn test_failed_decision_is_published_as_error() {
    let mut net = TestNetwork::new();
    let ticket = net.request("missing");
    assert!(net.wait_for("missing", ticket).is_err());

    let ready = net.drain_ready();
    assert_eq!(ready.len(), 1);
    assert_eq!(ready[0].ticket, ticket);
    assert!(ready[0].result.as_ref().unwrap_err().is_not_found());
}

#[test]
fn test_dispatch_is_capped_per_tick() {
    let mut params = SignalParams::default();
    params.coordination.max_dispatch_per_tick = 2;
    let mut net = TestNetwork::with_params(params).with_grid(2, 2);

    for id in ["I00", "I01", "I10", "I11", "I00"] {
        net.request(id);
    }
    net.tick(1);
    assert_eq!(net.resource::<DecisionQueue>().len(), 3);
    net.tick(1);
    assert_eq!(net.resource::<DecisionQueue>().len(), 1);
    net.tick(1);
    assert!(net.resource::<DecisionQueue>().is_empty());
}

#[test]
fn test_custom_observer_sees_only_root_decisions() {
    let collector = Arc::new(DecisionCollector::default());
    let mut net = TestNetwork::with_observer(collector.clone())
        .with_intersections(["A", "B", "C"])
        .with_road("A", "B")
        .with_road("B", "C");

    net.decide("A").unwrap();
    assert_eq!(*collector.roots.lock().unwrap(), vec!["A".to_string()]);
}

#[test]
fn test_held_snapshot_ignores_later_updates() {
    let mut net = TestNetwork::new()
        .with_intersections(["A", "B"])
        .with_road("A", "B");
    let held = net.network().snapshot();

    net.send_update(RoadTrafficUpdate {
        road_id: RoadId::new("A->B"),
        timestamp: "2024-01-15T08:30:00Z".into(),
        vehicle_count: 12,
        avg_speed: 18.0,
        queue_length: 4,
    });
    net.tick(1);

    assert!(held.traffic.is_empty());
    assert_eq!(net.network().traffic().len(), 1);
    assert_eq!(net.decide("B").unwrap().decision.level, CongestionLevel::Medium);
}

use std::collections::{HashMap, VecDeque};

use bevy::prelude::*;

use crate::coordination::CoordinationOutcome;
use crate::error::EngineError;
use crate::topology::IntersectionId;

/// Ask the plugin for a coordinated decision for one intersection.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SignalDecisionRequest {
    pub intersection_id: IntersectionId,
}

impl SignalDecisionRequest {
    pub fn new(id: impl Into<IntersectionId>) -> Self {
        Self {
            intersection_id: id.into(),
        }
    }
}

/// Emitted once per finished request, successful or not.
#[derive(Event, Debug, Clone)]
pub struct SignalDecisionReady {
    pub intersection_id: IntersectionId,
    pub ticket: u64,
    pub result: Result<CoordinationOutcome, EngineError>,
}

/// Pending decision requests in arrival order. Each request gets a ticket
/// that identifies its result in [`LatestDecisions`].
#[derive(Resource, Debug, Default)]
pub struct DecisionQueue {
    pending: VecDeque<(u64, IntersectionId)>,
    next_ticket: u64,
}

impl DecisionQueue {
    pub fn push(&mut self, id: impl Into<IntersectionId>) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending.push_back((ticket, id.into()));
        ticket
    }

    pub fn pop(&mut self) -> Option<(u64, IntersectionId)> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DecisionRecord {
    pub ticket: u64,
    /// Tick at which the result was collected.
    pub tick: u64,
    pub result: Result<CoordinationOutcome, EngineError>,
}

/// Most recent finished decision per intersection.
#[derive(Resource, Debug, Default)]
pub struct LatestDecisions {
    records: HashMap<IntersectionId, DecisionRecord>,
}

impl LatestDecisions {
    /// Store `record` unless a newer ticket for the same intersection is
    /// already present. Tasks may finish out of order.
    pub fn insert(&mut self, id: IntersectionId, record: DecisionRecord) {
        match self.records.get(&id) {
            Some(existing) if existing.ticket > record.ticket => {}
            _ => {
                self.records.insert(id, record);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&DecisionRecord> {
        self.records.get(id)
    }

    /// The record for `id` if it answers `ticket` or a later request.
    pub fn answered(&self, id: &str, ticket: u64) -> Option<&DecisionRecord> {
        self.get(id).filter(|record| record.ticket >= ticket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IntersectionId, &DecisionRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Fixed-update ticks run so far.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TickCounter(pub u64);

use bevy::prelude::*;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::UpdateRejected;
use crate::topology::RoadId;

/// Current measurement for one road.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub vehicle_count: u32,
    /// Mean speed in km/h.
    pub avg_speed: f64,
    pub queue_length: u32,
    /// ISO 8601 timestamp as reported by the sensor; validated on ingest, stored verbatim.
    pub timestamp: String,
}

impl Observation {
    pub fn new(vehicle_count: u32, avg_speed: f64, queue_length: u32) -> Self {
        Self {
            vehicle_count,
            avg_speed,
            queue_length,
            timestamp: String::new(),
        }
    }

    pub fn at(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }
}

/// Incoming sensor report for a single road. Counts are unsigned by type;
/// speed and the identifying strings are checked by [`RoadTrafficUpdate::validate`].
#[derive(Event, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadTrafficUpdate {
    pub road_id: RoadId,
    pub timestamp: String,
    pub vehicle_count: u32,
    pub avg_speed: f64,
    pub queue_length: u32,
}

impl RoadTrafficUpdate {
    pub fn validate(&self) -> Result<(), UpdateRejected> {
        if self.road_id.as_str().trim().is_empty() {
            return Err(UpdateRejected::EmptyRoadId);
        }
        if self.timestamp.trim().is_empty() {
            return Err(UpdateRejected::EmptyTimestamp);
        }
        if !is_iso8601(&self.timestamp) {
            return Err(UpdateRejected::InvalidTimestamp(self.timestamp.clone()));
        }
        if !self.avg_speed.is_finite() {
            return Err(UpdateRejected::NonFiniteSpeed);
        }
        if self.avg_speed < 0.0 {
            return Err(UpdateRejected::NegativeSpeed(self.avg_speed));
        }
        Ok(())
    }

    /// Validate and split into the store key and the observation to upsert.
    pub fn into_observation(self) -> Result<(RoadId, Observation), UpdateRejected> {
        self.validate()?;
        Ok((
            self.road_id,
            Observation {
                vehicle_count: self.vehicle_count,
                avg_speed: self.avg_speed,
                queue_length: self.queue_length,
                timestamp: self.timestamp,
            },
        ))
    }
}

/// Offset-less forms accepted alongside RFC 3339.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// ISO 8601 date or date-time, with or without a UTC offset.
pub fn is_iso8601(timestamp: &str) -> bool {
    DateTime::parse_from_rfc3339(timestamp).is_ok()
        || DateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.f%:z").is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(timestamp, format).is_ok())
        || NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").is_ok()
}

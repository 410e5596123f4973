//! Integration tests driving `SignalCoordinationPlugin` through the
//! `TestNetwork` harness: events in, async decision tasks, results out.

mod coordination_scenarios;
mod ingestion;
mod service_flow;

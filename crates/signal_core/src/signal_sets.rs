//! Ordering of the plugin's `FixedUpdate` systems.
//!
//! ```text
//! Ingest  →  Dispatch  →  Collect
//! ```
//!
//! * **Ingest** – advance the tick counter, apply road updates to the network
//!   snapshot, move decision requests into the queue.
//! * **Dispatch** – spawn coordination tasks over the snapshot produced by
//!   this tick's ingest.
//! * **Collect** – poll in-flight tasks and publish the finished ones.
//!
//! A request sent in tick N is dispatched in tick N and reads every update
//! sent in tick N or earlier.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignalSet {
    Ingest,
    Dispatch,
    Collect,
}

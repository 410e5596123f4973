//! Graph-aware congestion detection.
//!
//! An intersection's base level comes from its own load score:
//! - LOW: load < 10
//! - MEDIUM: 10 <= load < 30
//! - HIGH: load >= 30
//!
//! If any one-hop downstream intersection is independently HIGH (base level,
//! no second escalation pass), the node is *downstream blocked* and its
//! effective level is raised by one step.

mod classifier;
mod level;

pub use classifier::{base_level_of, classify, downstream_ids, CongestionReport};
pub use level::CongestionLevel;

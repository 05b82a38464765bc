//! Pipeline stage declarations and run statistics.

pub mod stage;
pub mod stats;

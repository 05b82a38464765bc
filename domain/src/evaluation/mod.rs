//! Quality evaluation: structure, narrative, facts and sensitivity.

pub mod facts;
pub mod report;
pub mod sensitivity;
pub mod structure;

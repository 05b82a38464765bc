//! Exhibition domain: entities, enrichment records, timeline and layout.

pub mod enrichment;
pub mod entities;
pub mod layout;
pub mod timeline;

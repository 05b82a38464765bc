//! Search adapters for the search port

mod offline;

pub use offline::OfflineSearch;

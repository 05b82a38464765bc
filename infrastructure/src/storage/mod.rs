//! Persistent storage adapters

mod sqlite_store;

pub use sqlite_store::SqliteExhibitionStore;

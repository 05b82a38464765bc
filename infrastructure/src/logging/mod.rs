//! Logging infrastructure: structured run event logging.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements
//! the [`EventLogger`](curator_application::EventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;

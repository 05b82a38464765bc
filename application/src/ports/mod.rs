//! Ports (interfaces) for external adapters
//!
//! These traits define how the application layer interacts with
//! external systems. Implementations are in the infrastructure layer.

pub mod event_logger;
pub mod exhibition_store;
pub mod model_gateway;
pub mod progress;
pub mod search;

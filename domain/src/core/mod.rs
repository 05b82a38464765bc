//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - generative text models the curator can call
//! - [`topic::Topic`] - a validated exhibition topic
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod string;
pub mod topic;

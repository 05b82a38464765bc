//! Progress reporting implementations of the progress port

pub mod reporter;

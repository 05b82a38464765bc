//! Output formatting for exhibitions and listings

pub mod console;
pub mod formatter;

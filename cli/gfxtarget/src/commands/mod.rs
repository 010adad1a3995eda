//! CLI command implementations.

pub mod aliases;
pub mod doctor;
pub mod resolve;

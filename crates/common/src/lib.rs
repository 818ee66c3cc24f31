//! Shared building blocks for the poll service crates.
//! - `types`: small response bodies reused across handlers.
//! - `utils::logging`: tracing subscriber initialisation.

pub mod types;
pub mod utils;

//! SeaORM entities for the poll service plus model-level validation helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod poll;

#[cfg(test)]
mod tests;

//! Service layer: board document store and background persistence.

pub mod board;
pub mod persistence;

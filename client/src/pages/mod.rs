//! Route-level page components.

pub mod board;
pub mod dashboard;

//! Partial-update builders for mutable entities.

pub mod category;

//! Ensemble request lifecycle and its result types.

pub mod image_budget;
pub mod stage;
pub mod value_objects;

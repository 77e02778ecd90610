//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod adjudicate;
pub mod run_ensemble;

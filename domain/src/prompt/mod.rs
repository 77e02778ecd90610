//! Prompt domain
//!
//! Templates for the adjudication call that turns candidates into the final answer.

mod template;

pub use template::AdjudicationPrompt;

//! Presentation layer for answer-quorum
//!
//! This crate contains the HTTP boundary, CLI definitions, console
//! formatting and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::{Cli, Command};
pub use output::ConsoleFormatter;
pub use progress::{LogProgress, ProgressReporter};
pub use server::{ApiError, AppState, create_router, serve};

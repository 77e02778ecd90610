//! Progress notifiers for ensemble requests

pub mod log_notifier;
pub mod reporter;

pub use log_notifier::LogProgress;
pub use reporter::ProgressReporter;

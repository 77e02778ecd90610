//! Progress notification port
//!
//! Defines the interface for reporting progress during an ensemble request.

use quorum_domain::{BackendId, RequestStage};

/// Callback for progress updates during an ensemble request
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console bars, log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when the request enters a stage
    fn on_stage(&self, stage: RequestStage, total_tasks: usize);

    /// Called when one backend has settled
    fn on_backend_complete(&self, backend: BackendId, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage(&self, _stage: RequestStage, _total_tasks: usize) {}
    fn on_backend_complete(&self, _backend: BackendId, _success: bool) {}
}

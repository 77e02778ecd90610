//! Progress as log lines, for the HTTP service

use quorum_application::ProgressNotifier;
use quorum_domain::{BackendId, RequestStage};
use tracing::{debug, info};

/// Emits one `tracing` event per stage and per settled backend
pub struct LogProgress;

impl ProgressNotifier for LogProgress {
    fn on_stage(&self, stage: RequestStage, total_tasks: usize) {
        match stage {
            RequestStage::FannedOut => info!(backends = total_tasks, "Querying backends"),
            RequestStage::Collected => info!(candidates = total_tasks, "Candidates collected"),
            _ => debug!(stage = stage.as_str(), count = total_tasks, "Stage reached"),
        }
    }

    fn on_backend_complete(&self, backend: BackendId, success: bool) {
        debug!(backend = %backend, success, "Backend settled");
    }
}

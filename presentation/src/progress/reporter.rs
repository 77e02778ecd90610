//! Progress reporting for the `ask` command

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use quorum_application::ProgressNotifier;
use quorum_domain::{BackendId, RequestStage};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports progress during an ensemble request with progress bars on stderr
pub struct ProgressReporter {
    multi: MultiProgress,
    fan_out_bar: Mutex<Option<ProgressBar>>,
    review_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            fan_out_bar: Mutex::new(None),
            review_spinner: Mutex::new(None),
        }
    }

    fn fan_out_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_fan_out(&self, total: usize) {
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::fan_out_style());
        pb.set_prefix(RequestStage::FannedOut.display_name());
        pb.set_message("Starting...");
        *self.fan_out_bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn finish_fan_out(&self, candidates: usize) {
        if let Some(pb) = self
            .fan_out_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_with_message(format!("{} candidates", candidates.to_string().green()));
        }
    }

    fn start_review(&self) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Adjudicating");
        pb.set_message("waiting for reviewer...");
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.review_spinner.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn finish_review(&self) {
        if let Some(pb) = self
            .review_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage(&self, stage: RequestStage, total_tasks: usize) {
        match stage {
            RequestStage::FannedOut => self.start_fan_out(total_tasks),
            RequestStage::Collected => self.finish_fan_out(total_tasks),
            RequestStage::Digested => self.start_review(),
            RequestStage::Adjudicated => self.finish_review(),
            RequestStage::Received | RequestStage::Returned => {}
        }
    }

    fn on_backend_complete(&self, backend: BackendId, success: bool) {
        if let Some(pb) = self
            .fan_out_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), backend)
            } else {
                format!("{} {}", "x".red(), backend)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }
}

//! Console output formatter for ensemble results

use colored::Colorize;
use quorum_application::EnsembleOutput;
use quorum_domain::{BackendId, DigestBody};

/// Formats ensemble results and service status for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The final answer only, as the HTTP route would return it
    pub fn format_answer(output: &EnsembleOutput) -> String {
        format!("{}\n", output.answer)
    }

    /// Candidates and digests followed by the final answer
    pub fn format_detailed(output: &EnsembleOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::section_header("Candidates"));
        if output.candidates.is_empty() {
            text.push_str(&format!("{}\n", "(no backend answered)".dimmed()));
        }
        for candidate in &output.candidates {
            text.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ({}) ──", candidate.backend, candidate.model)
                    .yellow()
                    .bold(),
                Self::indent(&candidate.text, "  ")
            ));
        }

        if !output.digests.is_empty() {
            text.push_str(&Self::section_header("Attachments"));
            for digest in &output.digests {
                let line = format!("{}", digest);
                match digest.body {
                    DigestBody::Preview(_) => text.push_str(&format!("  {}\n", line)),
                    DigestBody::ParseError(_) => text.push_str(&format!("  {}\n", line.red())),
                }
            }
        }

        text.push_str(&Self::section_header("Final answer"));
        text.push_str(&Self::format_answer(output));
        text
    }

    /// Backend status for the `config` command
    pub fn format_backends(active: &[BackendId], reviewer_model: &str, reviewer_ready: bool) -> String {
        let mut text = Self::section_header("Backends");
        for id in BackendId::ALL {
            let mark = if active.contains(&id) {
                "active".green()
            } else {
                "no credential".dimmed()
            };
            text.push_str(&format!("  {:<18} {}\n", id.as_str(), mark));
        }

        let reviewer = if reviewer_ready {
            "active".green()
        } else {
            "no credential".red()
        };
        text.push_str(&format!("  {:<18} {} ({})\n", "reviewer", reviewer, reviewer_model));
        text
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

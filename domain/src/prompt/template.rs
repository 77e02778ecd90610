//! Prompt templates for the adjudication call

use crate::ensemble::value_objects::{Candidate, FileDigest};

/// Templates for the reviewer that picks the final answer
pub struct AdjudicationPrompt;

impl AdjudicationPrompt {
    /// System prompt for the reviewer model
    pub fn system() -> &'static str {
        "You are a careful data analyst who outputs in strict JSON format only."
    }

    /// User prompt embedding the question, all candidates and the file digests.
    ///
    /// Candidates are rendered as a pretty-printed JSON array in the order
    /// given; digests one per line in attachment order.
    pub fn user_prompt(
        question: &str,
        candidates: &[Candidate],
        digests: &[FileDigest],
        image_budget_bytes: usize,
    ) -> String {
        let rendered_candidates = serde_json::to_string_pretty(candidates).unwrap_or_default();

        let rendered_digests = if digests.is_empty() {
            "(none)".to_string()
        } else {
            digests
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            r#"You are a strict evaluator. The question is:
{question}

Here are answers from multiple models:
{rendered_candidates}

Attached file summaries:
{rendered_digests}

Your task:
- Compare all answers
- Pick the most accurate one
- Ensure it matches the exact format requested in the question
- If a plot is required, output a base64 PNG string under {budget}
Return ONLY the final JSON answer."#,
            budget = format_budget(image_budget_bytes),
        )
    }
}

/// `100000` → `100kB`, `1536` → `1536 bytes`
fn format_budget(bytes: usize) -> String {
    if bytes >= 1000 && bytes % 1000 == 0 {
        format!("{}kB", bytes / 1000)
    } else {
        format!("{} bytes", bytes)
    }
}

//! Run Ensemble use case
//!
//! Orchestrates one request: fan the question out to every configured
//! backend, summarize tabular attachments meanwhile, then adjudicate.

use crate::config::EnsembleConfig;
use crate::ports::answer_backend::{AnswerBackend, BackendError};
use crate::ports::data_summarizer::DataSummarizer;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::review_gateway::ReviewGateway;
use crate::use_cases::adjudicate::{AdjudicateUseCase, AdjudicationError};
use quorum_domain::{
    AttachmentSet, BackendId, Candidate, FileDigest, Question, RequestStage,
    RequestValidationError, excerpt,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Errors that can occur during an ensemble request
///
/// Backend and summarizer failures are contained; only adjudication
/// failures reach the caller.
#[derive(Error, Debug)]
pub enum RunEnsembleError {
    #[error("Adjudication failed: {0}")]
    AdjudicationFailed(#[from] AdjudicationError),
}

/// Input for the RunEnsemble use case
#[derive(Debug, Clone)]
pub struct RunEnsembleInput {
    /// The question to ask
    pub question: Question,
    /// All uploads, question file included
    pub attachments: Arc<AttachmentSet>,
}

impl RunEnsembleInput {
    pub fn new(question: impl Into<Question>, attachments: AttachmentSet) -> Self {
        Self {
            question: question.into(),
            attachments: Arc::new(attachments),
        }
    }

    /// Build the input from uploads, taking the question from the first one
    pub fn from_attachments(attachments: AttachmentSet) -> Result<Self, RequestValidationError> {
        let question = Question::from_first_attachment(&attachments)?;
        Ok(Self::new(question, attachments))
    }
}

/// Result of one ensemble request
#[derive(Debug, Clone, Serialize)]
pub struct EnsembleOutput {
    /// The reviewer's answer, trimmed
    pub answer: String,
    /// Successful candidates in backend priority order
    pub candidates: Vec<Candidate>,
    /// Digests of tabular attachments in upload order
    pub digests: Vec<FileDigest>,
}

/// Use case for running one ensemble request
pub struct RunEnsembleUseCase {
    backends: Vec<Arc<dyn AnswerBackend>>,
    summarizer: Arc<dyn DataSummarizer>,
    adjudicator: AdjudicateUseCase,
    config: EnsembleConfig,
}

impl RunEnsembleUseCase {
    /// Backends are kept in priority order whatever order they are given in.
    pub fn new(
        mut backends: Vec<Arc<dyn AnswerBackend>>,
        summarizer: Arc<dyn DataSummarizer>,
        reviewer: Arc<dyn ReviewGateway>,
        config: EnsembleConfig,
    ) -> Self {
        backends.sort_by_key(|b| b.id());
        let adjudicator = AdjudicateUseCase::new(reviewer, config.adjudication.clone());
        Self {
            backends,
            summarizer,
            adjudicator,
            config,
        }
    }

    /// Backends with a credential, in priority order
    pub fn active_backends(&self) -> Vec<BackendId> {
        self.backends
            .iter()
            .filter(|b| b.is_configured())
            .map(|b| b.id())
            .collect()
    }

    pub fn reviewer_model(&self) -> &str {
        self.adjudicator.reviewer_model()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunEnsembleInput) -> Result<EnsembleOutput, RunEnsembleError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunEnsembleInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<EnsembleOutput, RunEnsembleError> {
        progress.on_stage(RequestStage::Received, input.attachments.len());
        info!(
            attachments = input.attachments.len(),
            tabular = input.attachments.tabular_count(),
            total_bytes = input.attachments.total_bytes(),
            question = %excerpt(input.question.content(), 80),
            "Ensemble request received"
        );

        // Summaries are local work; run them while the backends are queried
        let summarizer = Arc::clone(&self.summarizer);
        let attachments = Arc::clone(&input.attachments);
        let digest_task = tokio::task::spawn_blocking(move || summarizer.summarize(&attachments));

        let candidates = self.phase_fan_out(&input.question, progress).await;
        progress.on_stage(RequestStage::Collected, candidates.len());

        let digests = match digest_task.await {
            Ok(digests) => digests,
            Err(e) => {
                warn!("Summarizer task failed: {}", e);
                Vec::new()
            }
        };
        progress.on_stage(RequestStage::Digested, digests.len());

        let answer = self
            .adjudicator
            .execute(&input.question, &candidates, &digests)
            .await?;
        progress.on_stage(RequestStage::Adjudicated, 1);

        info!(
            candidates = candidates.len(),
            digests = digests.len(),
            answer_bytes = answer.len(),
            "Ensemble request adjudicated"
        );
        progress.on_stage(RequestStage::Returned, 0);

        Ok(EnsembleOutput {
            answer,
            candidates,
            digests,
        })
    }

    /// Query every configured backend in parallel.
    ///
    /// Each task owns one slot; the slots are read only after every task has
    /// settled, so candidates come out in priority order.
    async fn phase_fan_out(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Candidate> {
        let active: Vec<Arc<dyn AnswerBackend>> = self
            .backends
            .iter()
            .filter(|b| {
                if !b.is_configured() {
                    debug!(backend = %b.id(), "Skipping backend without credential");
                }
                b.is_configured()
            })
            .cloned()
            .collect();

        progress.on_stage(RequestStage::FannedOut, active.len());
        if active.is_empty() {
            info!("No backends configured; adjudicating without candidates");
            return Vec::new();
        }

        let limit = self.config.request_deadline;
        // A deadline past what `Instant` can represent never fires
        let deadline = limit.and_then(|d| Instant::now().checked_add(d));
        let mut join_set = JoinSet::new();
        let mut task_slots = HashMap::with_capacity(active.len());

        for (slot, backend) in active.iter().enumerate() {
            let backend = Arc::clone(backend);
            let question = question.content().to_string();

            let handle = join_set.spawn(async move {
                let result = query_backend(backend.as_ref(), &question, deadline, limit).await;
                (slot, result)
            });
            task_slots.insert(handle.id(), slot);
        }

        let mut slots: Vec<Option<Candidate>> = vec![None; active.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, Ok(text))) => {
                    let backend = &active[slot];
                    info!(backend = %backend.id(), model = backend.model(), "Backend answered");
                    progress.on_backend_complete(backend.id(), true);
                    slots[slot] = Some(Candidate::new(backend.id(), backend.model(), text));
                }
                Ok((slot, Err(e))) => {
                    let backend = &active[slot];
                    warn!(backend = %backend.id(), "Backend failed: {}", e);
                    progress.on_backend_complete(backend.id(), false);
                }
                Err(e) => match task_slots.get(&e.id()) {
                    Some(&slot) => {
                        let backend = &active[slot];
                        warn!(backend = %backend.id(), "Backend task join error: {}", e);
                        progress.on_backend_complete(backend.id(), false);
                    }
                    None => warn!("Backend task join error: {}", e),
                },
            }
        }

        slots.into_iter().flatten().collect()
    }
}

/// Call one backend, giving up when the request deadline passes
async fn query_backend(
    backend: &dyn AnswerBackend,
    question: &str,
    deadline: Option<Instant>,
    limit: Option<Duration>,
) -> Result<String, BackendError> {
    match deadline {
        Some(at) => tokio::time::timeout_at(at, backend.answer(question))
            .await
            .unwrap_or_else(|_| {
                Err(BackendError::Timeout(format!(
                    "request deadline of {:?} elapsed",
                    limit.unwrap_or_default()
                )))
            }),
        None => backend.answer(question).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdjudicationPolicy;
    use async_trait::async_trait;
    use quorum_domain::{Attachment, TabularKind};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct MockBackend {
        id: BackendId,
        configured: bool,
        delay: Duration,
        reply: Result<String, BackendError>,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn answering(id: BackendId, text: &str) -> Self {
            Self {
                id,
                configured: true,
                delay: Duration::ZERO,
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(id: BackendId, error: BackendError) -> Self {
            Self {
                reply: Err(error),
                ..Self::answering(id, "")
            }
        }

        fn unconfigured(id: BackendId) -> Self {
            Self {
                configured: false,
                ..Self::answering(id, "should never be used")
            }
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl AnswerBackend for MockBackend {
        fn id(&self) -> BackendId {
            self.id
        }

        fn model(&self) -> &str {
            self.id.default_model()
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn answer(&self, _question: &str) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        }
    }

    struct PanickingBackend(BackendId);

    #[async_trait]
    impl AnswerBackend for PanickingBackend {
        fn id(&self) -> BackendId {
            self.0
        }

        fn model(&self) -> &str {
            self.0.default_model()
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn answer(&self, _question: &str) -> Result<String, BackendError> {
            panic!("backend blew up");
        }
    }

    struct RecordingReviewer {
        reply: Result<String, BackendError>,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingReviewer {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl ReviewGateway for RecordingReviewer {
        fn model(&self) -> &str {
            "gpt-4o"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn review(&self, _system_prompt: &str, prompt: &str) -> Result<String, BackendError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    /// One preview per `.csv`, error note when the body is empty
    struct StubSummarizer;

    impl DataSummarizer for StubSummarizer {
        fn summarize(&self, attachments: &AttachmentSet) -> Vec<FileDigest> {
            attachments
                .iter()
                .filter_map(|a| {
                    let kind = a.tabular_kind()?;
                    Some(if a.bytes().is_empty() {
                        FileDigest::parse_error(kind, a.name(), "No columns to parse from file")
                    } else {
                        let rows = a.bytes().iter().filter(|b| **b == b'\n').count() - 1;
                        FileDigest::preview(kind, a.name(), format!("{} rows", rows))
                    })
                })
                .collect()
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        stages: Mutex<Vec<RequestStage>>,
        completions: Mutex<Vec<(BackendId, bool)>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage(&self, stage: RequestStage, _total_tasks: usize) {
            self.stages.lock().unwrap().push(stage);
        }

        fn on_backend_complete(&self, backend: BackendId, success: bool) {
            self.completions.lock().unwrap().push((backend, success));
        }
    }

    fn use_case(
        backends: Vec<Arc<dyn AnswerBackend>>,
        reviewer: Arc<RecordingReviewer>,
        config: EnsembleConfig,
    ) -> RunEnsembleUseCase {
        RunEnsembleUseCase::new(backends, Arc::new(StubSummarizer), reviewer, config)
    }

    fn question_only(text: &str) -> RunEnsembleInput {
        RunEnsembleInput::from_attachments(AttachmentSet::new(vec![Attachment::new(
            "q.txt",
            text.as_bytes().to_vec(),
        )]))
        .unwrap()
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_single_backend_scenario() {
        let reviewer = RecordingReviewer::replying("4");
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![
            Arc::new(MockBackend::answering(BackendId::OpenAiPrimary, "4")),
            Arc::new(MockBackend::unconfigured(BackendId::Anthropic)),
        ];
        let use_case = use_case(backends, Arc::clone(&reviewer), EnsembleConfig::default());

        let output = use_case.execute(question_only("What is 2+2?")).await.unwrap();

        assert_eq!(
            output.candidates,
            vec![Candidate::new(BackendId::OpenAiPrimary, "gpt-4o", "4")]
        );
        assert!(output.digests.is_empty());
        assert_eq!(output.answer, "4");

        let prompt = reviewer.last_prompt();
        assert!(prompt.contains("What is 2+2?"));
        assert!(prompt.contains("\"backend\": \"openai-primary\""));
        assert!(prompt.contains("\"answer\": \"4\""));
        assert!(prompt.contains("Attached file summaries:\n(none)"));
    }

    #[tokio::test]
    async fn test_failed_and_inactive_backends_are_omitted() {
        let reviewer = RecordingReviewer::replying("{}");
        let inactive = Arc::new(MockBackend::unconfigured(BackendId::OpenAiSecondary));
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![
            Arc::new(MockBackend::answering(BackendId::OpenAiPrimary, "primary")),
            inactive.clone(),
            Arc::new(MockBackend::failing(
                BackendId::Anthropic,
                BackendError::MalformedResponse("missing content".to_string()),
            )),
            Arc::new(MockBackend::answering(BackendId::Gemini, "gemini")),
        ];
        let use_case = use_case(backends, Arc::clone(&reviewer), EnsembleConfig::default());

        let output = use_case.execute(question_only("q")).await.unwrap();

        let ids: Vec<_> = output.candidates.iter().map(|c| c.backend).collect();
        assert_eq!(ids, vec![BackendId::OpenAiPrimary, BackendId::Gemini]);
        assert_eq!(inactive.calls.load(Ordering::SeqCst), 0);
        assert!(!reviewer.last_prompt().contains("anthropic"));
    }

    #[tokio::test]
    async fn test_zero_active_backends_still_adjudicates() {
        let reviewer = RecordingReviewer::replying("{\"answer\": null}");
        let backends: Vec<Arc<dyn AnswerBackend>> = BackendId::ALL
            .into_iter()
            .map(|id| Arc::new(MockBackend::unconfigured(id)) as Arc<dyn AnswerBackend>)
            .collect();
        let use_case = use_case(backends, Arc::clone(&reviewer), EnsembleConfig::default());

        let output = use_case.execute(question_only("q")).await.unwrap();

        assert!(output.candidates.is_empty());
        assert_eq!(output.answer, "{\"answer\": null}");
        assert_eq!(reviewer.prompts.lock().unwrap().len(), 1);
        assert!(reviewer.last_prompt().contains("Here are answers from multiple models:\n[]"));
    }

    #[tokio::test]
    async fn test_candidates_follow_priority_not_completion_order() {
        let reviewer = RecordingReviewer::replying("{}");
        // Given out of order, and the highest priority backend finishes last
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![
            Arc::new(MockBackend::answering(BackendId::Gemini, "d")),
            Arc::new(
                MockBackend::answering(BackendId::OpenAiPrimary, "a")
                    .delayed(Duration::from_millis(60)),
            ),
            Arc::new(
                MockBackend::answering(BackendId::Anthropic, "c")
                    .delayed(Duration::from_millis(20)),
            ),
            Arc::new(
                MockBackend::answering(BackendId::OpenAiSecondary, "b")
                    .delayed(Duration::from_millis(40)),
            ),
        ];
        let use_case = use_case(backends, reviewer, EnsembleConfig::default());

        let first = use_case.execute(question_only("q")).await.unwrap();
        let second = use_case.execute(question_only("q")).await.unwrap();

        let texts: Vec<_> = first.candidates.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
        assert_eq!(first.candidates, second.candidates);
    }

    #[tokio::test]
    async fn test_deadline_omits_pending_backends() {
        let reviewer = RecordingReviewer::replying("{}");
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![
            Arc::new(MockBackend::answering(BackendId::OpenAiPrimary, "fast")),
            Arc::new(
                MockBackend::answering(BackendId::Anthropic, "slow")
                    .delayed(Duration::from_secs(5)),
            ),
        ];
        let config =
            EnsembleConfig::default().with_request_deadline(Some(Duration::from_millis(100)));
        let use_case = use_case(backends, reviewer, config);
        let progress = RecordingProgress::default();

        let started = std::time::Instant::now();
        let output = use_case
            .execute_with_progress(question_only("q"), &progress)
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert_eq!(output.candidates.len(), 1);
        assert_eq!(output.candidates[0].text, "fast");
        let completions = progress.completions.lock().unwrap();
        assert!(completions.contains(&(BackendId::Anthropic, false)));
    }

    #[tokio::test]
    async fn test_unrepresentable_deadline_behaves_as_none() {
        let reviewer = RecordingReviewer::replying("{}");
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![Arc::new(
            MockBackend::answering(BackendId::OpenAiPrimary, "4").delayed(Duration::from_millis(10)),
        )];
        let config =
            EnsembleConfig::default().with_request_deadline(Some(Duration::from_secs(u64::MAX)));
        let use_case = use_case(backends, reviewer, config);

        let output = use_case.execute(question_only("q")).await.unwrap();

        assert_eq!(output.candidates.len(), 1);
        assert_eq!(output.candidates[0].text, "4");
    }

    #[tokio::test]
    async fn test_panicking_backend_is_reported_as_failed() {
        let reviewer = RecordingReviewer::replying("{}");
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![
            Arc::new(MockBackend::answering(BackendId::OpenAiPrimary, "ok")),
            Arc::new(PanickingBackend(BackendId::Anthropic)),
        ];
        let use_case = use_case(backends, reviewer, EnsembleConfig::default());
        let progress = RecordingProgress::default();

        let output = use_case
            .execute_with_progress(question_only("q"), &progress)
            .await
            .unwrap();

        assert_eq!(output.candidates.len(), 1);
        assert_eq!(output.candidates[0].backend, BackendId::OpenAiPrimary);
        let completions = progress.completions.lock().unwrap();
        assert_eq!(completions.len(), 2);
        assert!(completions.contains(&(BackendId::Anthropic, false)));
    }

    #[tokio::test]
    async fn test_csv_digest_does_not_affect_candidates() {
        let reviewer = RecordingReviewer::replying("{}");
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![Arc::new(MockBackend::answering(
            BackendId::OpenAiPrimary,
            "4",
        ))];
        let use_case = use_case(backends, Arc::clone(&reviewer), EnsembleConfig::default());
        let input = RunEnsembleInput::from_attachments(AttachmentSet::new(vec![
            Attachment::new("q.txt", b"Sum column a".to_vec()),
            Attachment::new("data.csv", b"a,b\n1,2\n3,4\n5,6\n".to_vec()),
            Attachment::new("notes.md", b"ignored".to_vec()),
        ]))
        .unwrap();

        let output = use_case.execute(input).await.unwrap();

        assert_eq!(output.candidates.len(), 1);
        assert_eq!(
            output.digests,
            vec![FileDigest::preview(TabularKind::Csv, "data.csv", "3 rows")]
        );
        assert!(reviewer.last_prompt().contains("CSV data.csv: 3 rows"));
    }

    #[tokio::test]
    async fn test_malformed_attachment_yields_error_note() {
        let reviewer = RecordingReviewer::replying("{}");
        let use_case = use_case(Vec::new(), reviewer, EnsembleConfig::default());
        let input = RunEnsembleInput::from_attachments(AttachmentSet::new(vec![
            Attachment::new("q.txt", b"q".to_vec()),
            Attachment::new("empty.csv", Vec::new()),
        ]))
        .unwrap();

        let output = use_case.execute(input).await.unwrap();

        assert_eq!(output.digests.len(), 1);
        assert!(output.digests[0].is_error());
    }

    #[tokio::test]
    async fn test_adjudication_failure_is_surfaced() {
        let reviewer = Arc::new(RecordingReviewer {
            reply: Err(BackendError::Timeout("operation timed out".to_string())),
            prompts: Mutex::new(Vec::new()),
        });
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![Arc::new(MockBackend::answering(
            BackendId::OpenAiPrimary,
            "4",
        ))];
        let use_case = use_case(backends, reviewer, EnsembleConfig::default());

        let err = use_case.execute(question_only("q")).await.unwrap_err();

        let RunEnsembleError::AdjudicationFailed(inner) = &err;
        assert!(inner.is_timeout());
        assert!(err.to_string().contains("operation timed out"));
    }

    #[tokio::test]
    async fn test_stages_are_reported_in_order() {
        let reviewer = RecordingReviewer::replying("{}");
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![Arc::new(MockBackend::answering(
            BackendId::Gemini,
            "x",
        ))];
        let use_case = use_case(backends, reviewer, EnsembleConfig::default());
        let progress = RecordingProgress::default();

        use_case
            .execute_with_progress(question_only("q"), &progress)
            .await
            .unwrap();

        assert_eq!(
            *progress.stages.lock().unwrap(),
            vec![
                RequestStage::Received,
                RequestStage::FannedOut,
                RequestStage::Collected,
                RequestStage::Digested,
                RequestStage::Adjudicated,
                RequestStage::Returned,
            ]
        );
        assert_eq!(
            *progress.completions.lock().unwrap(),
            vec![(BackendId::Gemini, true)]
        );
    }

    #[test]
    fn test_active_backends_in_priority_order() {
        let backends: Vec<Arc<dyn AnswerBackend>> = vec![
            Arc::new(MockBackend::answering(BackendId::Gemini, "")),
            Arc::new(MockBackend::unconfigured(BackendId::Anthropic)),
            Arc::new(MockBackend::answering(BackendId::OpenAiPrimary, "")),
        ];
        let use_case = RunEnsembleUseCase::new(
            backends,
            Arc::new(StubSummarizer),
            RecordingReviewer::replying("{}"),
            EnsembleConfig::default().with_adjudication(AdjudicationPolicy::default()),
        );

        assert_eq!(
            use_case.active_backends(),
            vec![BackendId::OpenAiPrimary, BackendId::Gemini]
        );
        assert_eq!(use_case.reviewer_model(), "gpt-4o");
    }
}

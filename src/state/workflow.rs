/// Try-on workflow controller
///
/// Holds the two input slots and the optional instruction, and drives the
/// single outbound generation request:
///
/// ```text
/// Idle ──try_on──▶ Loading ──ok──▶ Success
///                     │
///                     └──err──▶ Failure
/// Success / Failure ──try_on──▶ Loading
/// ```
///
/// The request itself is split in two halves so the UI runtime can run it
/// in the background: [`TryOnWorkflow::begin_try_on`] validates and hands
/// out a [`GenerationJob`], [`TryOnWorkflow::finish`] applies the outcome.

use tracing::{debug, info, warn};

use super::data::{effective_instruction, Slot, MISSING_IMAGES_MESSAGE};
use super::recent::RecentCreations;
use crate::api::GenerationBackend;
use crate::error::GenerationError;
use crate::source::ImagePayload;

/// Where the workflow currently stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading,
    Success(ImagePayload),
    Failure(String),
}

/// Snapshot of everything one generation request needs
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationJob {
    pub instruction: String,
    pub model_image: ImagePayload,
    pub item_image: ImagePayload,
}

/// What the result area should display
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultView<'a> {
    Placeholder,
    Loading,
    Image(&'a ImagePayload),
    Error(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct TryOnWorkflow {
    model_image: Option<ImagePayload>,
    item_image: Option<ImagePayload>,
    instruction: String,
    state: WorkflowState,
    recent: RecentCreations,
    /// Bumped whenever an image slot, the state or the ring changes
    revision: u64,
}

impl TryOnWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Inputs ==========

    pub fn set_model_image(&mut self, payload: Option<ImagePayload>) {
        self.model_image = payload;
        self.revision += 1;
    }

    pub fn set_item_image(&mut self, payload: Option<ImagePayload>) {
        self.item_image = payload;
        self.revision += 1;
    }

    pub fn set_image(&mut self, slot: Slot, payload: Option<ImagePayload>) {
        match slot {
            Slot::Model => self.set_model_image(payload),
            Slot::Item => self.set_item_image(payload),
        }
    }

    pub fn image(&self, slot: Slot) -> Option<&ImagePayload> {
        match slot {
            Slot::Model => self.model_image.as_ref(),
            Slot::Item => self.item_image.as_ref(),
        }
    }

    pub fn set_instruction(&mut self, text: impl Into<String>) {
        self.instruction = text.into();
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    // ========== State ==========

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn recent(&self) -> &RecentCreations {
        &self.recent
    }

    /// Changes whenever the displayed images may have changed
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_loading(&self) -> bool {
        self.state == WorkflowState::Loading
    }

    /// Whether the trigger control should be enabled
    ///
    /// Missing inputs leave it enabled; pressing it then reports what is missing.
    pub fn can_try_on(&self) -> bool {
        !self.is_loading()
    }

    /// The latest successful output, if the workflow is showing one
    pub fn result(&self) -> Option<&ImagePayload> {
        match &self.state {
            WorkflowState::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// What to show in the result area
    ///
    /// Clearing both inputs brings back the placeholder in place of a
    /// previous output. Failures stay visible.
    pub fn result_view(&self) -> ResultView<'_> {
        let inputs_cleared = self.model_image.is_none() && self.item_image.is_none();

        match &self.state {
            WorkflowState::Loading => ResultView::Loading,
            WorkflowState::Failure(message) => ResultView::Error(message),
            WorkflowState::Success(_) if inputs_cleared => ResultView::Placeholder,
            WorkflowState::Success(payload) => ResultView::Image(payload),
            WorkflowState::Idle => ResultView::Placeholder,
        }
    }

    // ========== Generation ==========

    /// Validate inputs and enter `Loading`
    ///
    /// Returns the job to send, or `None` when nothing should be sent:
    /// either a request is already in flight (no-op) or an input is missing
    /// (the workflow moves to `Failure` with the fixed message).
    pub fn begin_try_on(&mut self) -> Option<GenerationJob> {
        if self.is_loading() {
            debug!("Try-on ignored: a request is already in flight");
            return None;
        }

        let (Some(model_image), Some(item_image)) = (&self.model_image, &self.item_image) else {
            info!("Try-on rejected: missing input image");
            self.state = WorkflowState::Failure(MISSING_IMAGES_MESSAGE.to_string());
            self.revision += 1;
            return None;
        };

        let job = GenerationJob {
            instruction: effective_instruction(&self.instruction).to_string(),
            model_image: model_image.clone(),
            item_image: item_image.clone(),
        };

        info!("✨ Try-on started");
        self.state = WorkflowState::Loading;
        self.revision += 1;
        Some(job)
    }

    /// Apply the outcome of the in-flight request
    pub fn finish(&mut self, outcome: Result<ImagePayload, GenerationError>) {
        if !self.is_loading() {
            warn!("Generation outcome arrived while {:?}, ignoring", self.state);
            return;
        }

        match outcome {
            Ok(payload) => {
                info!("✅ Try-on complete: {}", payload);
                self.recent.push(payload.clone());
                self.state = WorkflowState::Success(payload);
            }
            Err(e) => {
                warn!("❌ Try-on failed: {}", e);
                self.state = WorkflowState::Failure(e.to_string());
            }
        }
        self.revision += 1;
    }

    /// Run a whole try-on against a backend: begin, await, finish
    pub async fn try_on(&mut self, backend: &dyn GenerationBackend) {
        let Some(job) = self.begin_try_on() else {
            return;
        };

        let outcome = backend
            .generate(&job.instruction, &job.model_image, &job.item_image)
            .await;
        self.finish(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::DEFAULT_INSTRUCTION;
    use crate::state::recent::RECENT_CAPACITY;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend that replays scripted outcomes and records what it was sent
    struct ScriptedBackend {
        outcomes: Mutex<Vec<Result<ImagePayload, GenerationError>>>,
        calls: AtomicUsize,
        instructions: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<Result<ImagePayload, GenerationError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicUsize::new(0),
                instructions: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationBackend for ScriptedBackend {
        async fn generate(
            &self,
            instruction: &str,
            _model_image: &ImagePayload,
            _item_image: &ImagePayload,
        ) -> Result<ImagePayload, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.instructions.lock().unwrap().push(instruction.to_string());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn image(tag: &str) -> ImagePayload {
        ImagePayload::from_data_uri(format!("data:image/png;base64,{}", tag))
    }

    fn ready_workflow() -> TryOnWorkflow {
        let mut workflow = TryOnWorkflow::new();
        workflow.set_model_image(Some(image("MODEL")));
        workflow.set_item_image(Some(image("ITEM")));
        workflow
    }

    #[tokio::test]
    async fn test_success_is_displayed_and_recorded() {
        let backend = ScriptedBackend::new(vec![Ok(image("AAA"))]);
        let mut workflow = ready_workflow();

        workflow.try_on(&backend).await;

        assert_eq!(workflow.state(), &WorkflowState::Success(image("AAA")));
        assert_eq!(workflow.result_view(), ResultView::Image(&image("AAA")));
        assert_eq!(workflow.recent().list().next(), Some(&image("AAA")));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_backend_error_message_is_surfaced() {
        let backend = ScriptedBackend::new(vec![Err(GenerationError::Backend(
            "model overloaded".to_string(),
        ))]);
        let mut workflow = ready_workflow();

        workflow.try_on(&backend).await;

        assert_eq!(workflow.state(), &WorkflowState::Failure("model overloaded".to_string()));
        assert!(workflow.recent().is_empty());
        // Inputs survive so the user can retry without re-uploading
        assert_eq!(workflow.image(Slot::Model), Some(&image("MODEL")));
        assert_eq!(workflow.image(Slot::Item), Some(&image("ITEM")));
    }

    #[tokio::test]
    async fn test_malformed_response_uses_generic_message() {
        let backend = ScriptedBackend::new(vec![Err(GenerationError::Malformed)]);
        let mut workflow = ready_workflow();

        workflow.try_on(&backend).await;

        assert_eq!(
            workflow.state(),
            &WorkflowState::Failure("Invalid response from server".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_images_never_reach_the_backend() {
        let backend = ScriptedBackend::new(vec![]);

        for (model, item) in [(None, Some(image("ITEM"))), (Some(image("MODEL")), None), (None, None)] {
            let mut workflow = TryOnWorkflow::new();
            workflow.set_model_image(model);
            workflow.set_item_image(item);

            workflow.try_on(&backend).await;

            assert_eq!(
                workflow.state(),
                &WorkflowState::Failure(MISSING_IMAGES_MESSAGE.to_string())
            );
        }
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_second_trigger_while_loading_is_a_no_op() {
        let mut workflow = ready_workflow();

        assert!(workflow.begin_try_on().is_some());
        assert!(!workflow.can_try_on());
        assert!(workflow.begin_try_on().is_none());
        assert_eq!(workflow.state(), &WorkflowState::Loading);

        // Clearing an input mid-flight doesn't turn the no-op into a failure
        workflow.set_item_image(None);
        assert!(workflow.begin_try_on().is_none());
        assert_eq!(workflow.state(), &WorkflowState::Loading);
    }

    #[test]
    fn test_outcome_without_request_is_ignored() {
        let mut workflow = ready_workflow();
        workflow.finish(Ok(image("STRAY")));

        assert_eq!(workflow.state(), &WorkflowState::Idle);
        assert!(workflow.recent().is_empty());
    }

    #[test]
    fn test_new_attempt_from_success_or_failure_reloads() {
        let mut workflow = ready_workflow();

        workflow.begin_try_on();
        workflow.finish(Ok(image("ONE")));
        assert!(workflow.begin_try_on().is_some());
        assert_eq!(workflow.state(), &WorkflowState::Loading);

        workflow.finish(Err(GenerationError::Network("connection refused".to_string())));
        assert!(matches!(workflow.state(), WorkflowState::Failure(_)));
        assert!(workflow.begin_try_on().is_some());
        assert_eq!(workflow.result_view(), ResultView::Loading);
    }

    #[tokio::test]
    async fn test_recent_holds_last_four_outputs() {
        let outcomes = (0..6).map(|n| Ok(image(&format!("OUT{}", n)))).collect();
        let backend = ScriptedBackend::new(outcomes);
        let mut workflow = ready_workflow();

        for _ in 0..6 {
            workflow.try_on(&backend).await;
        }

        let recent: Vec<_> = workflow.recent().list().cloned().collect();
        assert_eq!(recent.len(), RECENT_CAPACITY);
        assert_eq!(
            recent,
            vec![image("OUT5"), image("OUT4"), image("OUT3"), image("OUT2")]
        );
    }

    #[tokio::test]
    async fn test_instruction_resolution() {
        let backend = ScriptedBackend::new(vec![Ok(image("A")), Ok(image("B"))]);
        let mut workflow = ready_workflow();

        workflow.try_on(&backend).await;
        workflow.set_instruction("Add a vintage filter");
        workflow.try_on(&backend).await;

        let sent = backend.instructions.lock().unwrap().clone();
        assert_eq!(sent, vec![DEFAULT_INSTRUCTION.to_string(), "Add a vintage filter".to_string()]);
    }

    #[test]
    fn test_clearing_inputs_is_immediate_and_shows_placeholder() {
        let mut workflow = ready_workflow();
        workflow.begin_try_on();
        workflow.finish(Ok(image("DONE")));

        workflow.set_image(Slot::Model, None);
        assert_eq!(workflow.image(Slot::Model), None);
        assert_eq!(workflow.result_view(), ResultView::Image(&image("DONE")));

        workflow.set_image(Slot::Item, None);
        assert_eq!(workflow.result_view(), ResultView::Placeholder);
        assert_eq!(workflow.state(), &WorkflowState::Success(image("DONE")));
    }

    #[test]
    fn test_missing_images_message_is_shown_with_empty_slots() {
        let mut workflow = TryOnWorkflow::new();
        assert!(workflow.begin_try_on().is_none());

        assert_eq!(workflow.result_view(), ResultView::Error(MISSING_IMAGES_MESSAGE));
    }

    #[test]
    fn test_failure_stays_visible_after_clearing_inputs() {
        let mut workflow = ready_workflow();
        workflow.begin_try_on();
        workflow.finish(Err(GenerationError::Backend("model overloaded".to_string())));

        workflow.set_image(Slot::Model, None);
        workflow.set_image(Slot::Item, None);
        assert_eq!(workflow.result_view(), ResultView::Error("model overloaded"));
    }

    #[test]
    fn test_revision_tracks_displayed_changes() {
        let mut workflow = TryOnWorkflow::new();
        let start = workflow.revision();

        workflow.set_instruction("Make it blue");
        assert_eq!(workflow.revision(), start);

        workflow.set_model_image(Some(image("MODEL")));
        let after_input = workflow.revision();
        assert!(after_input > start);

        workflow.set_item_image(Some(image("ITEM")));
        workflow.begin_try_on();
        let loading = workflow.revision();
        workflow.finish(Ok(image("DONE")));
        assert!(workflow.revision() > loading);
    }
}

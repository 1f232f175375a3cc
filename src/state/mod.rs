/// State management module
///
/// This module handles all try-on state, including:
/// - Input slots and fixed instruction texts (data.rs)
/// - The generation workflow state machine (workflow.rs)
/// - The bounded history of recent creations (recent.rs)

pub mod data;
pub mod recent;
pub mod workflow;

pub use data::Slot;
pub use workflow::{GenerationJob, ResultView, TryOnWorkflow, WorkflowState};

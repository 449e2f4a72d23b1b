/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::counter::Strategy;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used across the crate
pub type LessonResult<T> = Result<T, LessonError>;

/// Errors surfaced by the computation, handoff and counter scenarios
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum LessonError {
    #[error("Failed to launch worker: {0}")]
    #[diagnostic(
        code(lessons::launch_failure),
        help("The OS refused to spawn a thread. Check thread limits and available memory.")
    )]
    LaunchFailure(String),

    #[error("Precondition violated: {0}")]
    #[diagnostic(
        code(lessons::precondition_violation),
        help("Single-use operations may only be performed once, and results only read after wait().")
    )]
    PreconditionViolation(String),

    #[error("Producer dropped without sending a value")]
    #[diagnostic(
        code(lessons::abandoned_producer),
        help("The producing side went away before calling send(). Nothing will ever arrive.")
    )]
    AbandonedProducer,

    #[error("Invariant violated by {strategy} counter in trial {trial}: expected {expected}, observed {observed}")]
    #[diagnostic(
        code(lessons::invariant_violation),
        help("A synchronized counter lost or invented increments. This is always a defect.")
    )]
    InvariantViolation {
        strategy: Strategy,
        trial: usize,
        expected: u64,
        observed: u64,
    },

    #[error("Worker panicked: {0}")]
    #[diagnostic(
        code(lessons::worker_panicked),
        help("A background worker terminated abnormally before producing its effect.")
    )]
    WorkerPanicked(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(lessons::configuration_error),
        help("Invalid configuration. Review the LESSONS_* environment variables.")
    )]
    Configuration(String),
}

impl LessonError {
    /// Convert a thread spawn failure into a launch failure
    pub(crate) fn launch(what: &str, err: std::io::Error) -> Self {
        LessonError::LaunchFailure(format!("{}: {}", what, err))
    }

    /// Convert a join payload into a panic error
    pub(crate) fn panicked(what: &str, payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        LessonError::WorkerPanicked(format!("{}: {}", what, message))
    }
}

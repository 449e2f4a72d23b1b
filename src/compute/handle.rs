/*!
 * Computation Handles
 *
 * Single-owner handle to a computation running on a background thread
 */

use super::work::{sum_of_square_roots, WorkSpec};
use crate::core::{LessonError, LessonResult};
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Handle to an in-flight or completed computation
///
/// # States
///
/// - Running: the worker thread may still be computing
/// - Completed: `wait` has joined the worker and captured its result
///
/// # Preconditions
///
/// `result` may only be called after `wait` has returned `Ok`. Earlier calls
/// return `LessonError::PreconditionViolation` instead of a placeholder value.
///
/// Dropping a handle that was never waited on detaches the worker; it runs to
/// completion and its result is discarded.
pub struct ComputationHandle {
    spec: WorkSpec,
    // Exactly one of these is Some
    worker: Option<JoinHandle<f64>>,
    outcome: Option<LessonResult<f64>>,
}

impl ComputationHandle {
    /// Start the computation on a named background thread
    pub fn launch(spec: WorkSpec) -> LessonResult<Self> {
        let worker = thread::Builder::new()
            .name(format!("compute-{}-{}", spec.min(), spec.max()))
            .spawn(move || sum_of_square_roots(&spec))
            .map_err(|e| LessonError::launch("computation worker", e))?;

        debug!(min = spec.min(), max = spec.max(), "Computation launched");

        Ok(Self {
            spec,
            worker: Some(worker),
            outcome: None,
        })
    }

    /// Block until the computation has finished
    ///
    /// Calling `wait` on a completed handle is a no-op that reports the same
    /// outcome again.
    pub fn wait(&mut self) -> LessonResult<()> {
        if let Some(worker) = self.worker.take() {
            let outcome = worker
                .join()
                .map_err(|payload| LessonError::panicked("computation worker", payload));
            if let Ok(value) = &outcome {
                debug!(result = *value, "Computation completed");
            }
            self.outcome = Some(outcome);
        }
        self.result().map(|_| ())
    }

    /// Computed value; requires a prior `wait`
    pub fn result(&self) -> LessonResult<f64> {
        match &self.outcome {
            Some(Ok(value)) => Ok(*value),
            Some(Err(err)) => Err(err.clone()),
            None => Err(LessonError::PreconditionViolation(
                "result() called before wait() completed".into(),
            )),
        }
    }

    /// Whether `wait` has observed completion
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.outcome.is_some()
    }

    /// Whether the worker thread has terminated, without blocking
    pub fn is_finished(&self) -> bool {
        self.worker
            .as_ref()
            .map(|worker| worker.is_finished())
            .unwrap_or(true)
    }

    #[inline]
    pub fn spec(&self) -> &WorkSpec {
        &self.spec
    }
}

impl std::fmt::Debug for ComputationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputationHandle")
            .field("spec", &self.spec)
            .field("running", &self.worker.is_some())
            .field("outcome", &self.outcome)
            .finish()
    }
}

/// Start a computation over `spec`
#[inline]
pub fn launch(spec: WorkSpec) -> LessonResult<ComputationHandle> {
    ComputationHandle::launch(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_wait_result() {
        let mut handle = launch(WorkSpec::new(0, 10).unwrap()).unwrap();
        handle.wait().unwrap();

        let expected: f64 = (0..=10).map(|i| (i as f64).sqrt()).sum();
        assert!((handle.result().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_result_before_wait_is_rejected() {
        let handle = launch(WorkSpec::new(0, 1_000).unwrap()).unwrap();
        assert!(!handle.is_completed());
        assert!(matches!(
            handle.result(),
            Err(LessonError::PreconditionViolation(_))
        ));
    }

    #[test]
    fn test_wait_twice_is_noop() {
        let mut handle = launch(WorkSpec::new(5, 5).unwrap()).unwrap();
        handle.wait().unwrap();
        let first = handle.result().unwrap();

        handle.wait().unwrap();
        assert_eq!(handle.result().unwrap(), first);
        assert!(handle.is_finished());
    }
}

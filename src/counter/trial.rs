/*!
 * Counter Trials
 *
 * Spawn K workers over one fresh counter, join them all, read the result.
 *
 * # Lifecycle
 *
 * Idle -> Running (workers spawned) -> AllJoined -> Read
 *
 * The final value is read only after the scope has joined every worker, so
 * the read observes every increment that was not lost to a race.
 */

use super::traits::Strategy;
use crate::core::{LessonError, LessonResult};
use serde::{Deserialize, Serialize};
use std::thread;
use tracing::{debug, info, instrument, warn};

/// Shape of a single trial: K workers each adding N
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSpec {
    pub workers: usize,
    pub increments: u64,
}

impl TrialSpec {
    pub const fn new(workers: usize, increments: u64) -> Self {
        Self {
            workers,
            increments,
        }
    }

    /// K * N
    ///
    /// # Errors
    ///
    /// `Configuration` if the product does not fit in a `u64`
    #[inline]
    pub fn expected(&self) -> LessonResult<u64> {
        (self.workers as u64)
            .checked_mul(self.increments)
            .ok_or_else(|| {
                LessonError::Configuration(format!(
                    "{} workers * {} increments overflows the counter",
                    self.workers, self.increments
                ))
            })
    }
}

/// Result of one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub index: usize,
    pub expected: u64,
    pub observed: u64,
}

impl TrialOutcome {
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.observed == self.expected
    }

    /// Increments that never reached the counter
    #[inline]
    pub fn lost(&self) -> u64 {
        self.expected.saturating_sub(self.observed)
    }
}

/// Run one trial on a fresh counter
///
/// # Errors
///
/// - `Configuration` if K * N overflows; no worker is spawned
/// - `LaunchFailure` if a worker thread cannot be spawned; workers already
///   running are still joined before returning
/// - `WorkerPanicked` if a worker panics
pub fn run_trial(strategy: Strategy, spec: TrialSpec, index: usize) -> LessonResult<TrialOutcome> {
    let expected = spec.expected()?;
    let counter = strategy.new_counter();
    let counter = counter.as_ref();

    thread::scope(|scope| -> LessonResult<()> {
        let mut workers = Vec::with_capacity(spec.workers);
        let mut launch_error = None;

        for worker_id in 0..spec.workers {
            let spawned = thread::Builder::new()
                .name(format!("{}-worker-{}", strategy, worker_id))
                .spawn_scoped(scope, move || counter.increment_by(spec.increments));
            match spawned {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    launch_error = Some(LessonError::launch("counter worker", e));
                    break;
                }
            }
        }

        let mut join_error = None;
        for worker in workers {
            if let Err(payload) = worker.join() {
                if join_error.is_none() {
                    join_error = Some(LessonError::panicked("counter worker", payload));
                }
            }
        }

        match launch_error.or(join_error) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })?;

    let outcome = TrialOutcome {
        index,
        expected,
        observed: counter.read(),
    };
    debug!(
        strategy = %strategy,
        trial = index,
        observed = outcome.observed,
        "Trial finished"
    );
    Ok(outcome)
}

/// Aggregate of a batch of trials for one strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialReport {
    pub strategy: Strategy,
    pub spec: TrialSpec,
    pub trials: usize,
    /// Every trial whose final value differed from K * N
    pub divergent: Vec<TrialOutcome>,
    /// Smallest final value seen, `None` for an empty batch
    pub min_observed: Option<u64>,
}

impl TrialReport {
    fn new(strategy: Strategy, spec: TrialSpec) -> Self {
        Self {
            strategy,
            spec,
            trials: 0,
            divergent: Vec::new(),
            min_observed: None,
        }
    }

    fn record(&mut self, outcome: TrialOutcome) {
        self.trials += 1;
        self.min_observed = Some(
            self.min_observed
                .map_or(outcome.observed, |min| min.min(outcome.observed)),
        );
        if !outcome.is_exact() {
            self.divergent.push(outcome);
        }
    }

    /// Trials that ended exactly at K * N
    #[inline]
    pub fn exact(&self) -> usize {
        self.trials - self.divergent.len()
    }

    /// Increments lost across the whole batch
    pub fn total_lost(&self) -> u64 {
        self.divergent.iter().map(TrialOutcome::lost).sum()
    }

    /// Check the batch against the counter invariants
    ///
    /// Any value above K * N is a violation for every strategy. Any
    /// divergence at all is a violation for strategies that must hold the
    /// invariant. Lost updates in the unsynchronized variant pass.
    pub fn verify(&self) -> LessonResult<()> {
        let offending = self.divergent.iter().find(|outcome| {
            outcome.observed > outcome.expected || self.strategy.must_hold_invariant()
        });

        match offending {
            Some(outcome) => Err(LessonError::InvariantViolation {
                strategy: self.strategy,
                trial: outcome.index,
                expected: outcome.expected,
                observed: outcome.observed,
            }),
            None => Ok(()),
        }
    }
}

/// Run `count` trials and collect a report
///
/// Divergent trials are logged as they happen; the report is not verified
/// here so callers can decide how to treat the unsynchronized control.
#[instrument(skip_all, fields(strategy = %strategy, workers = spec.workers, increments = spec.increments))]
pub fn run_trials(strategy: Strategy, spec: TrialSpec, count: usize) -> LessonResult<TrialReport> {
    let mut report = TrialReport::new(strategy, spec);

    for index in 0..count {
        let outcome = run_trial(strategy, spec, index)?;
        if !outcome.is_exact() {
            warn!(
                trial = index,
                observed = outcome.observed,
                expected = outcome.expected,
                lost = outcome.lost(),
                "Counter diverged"
            );
        }
        report.record(outcome);
    }

    info!(
        trials = report.trials,
        exact = report.exact(),
        divergent = report.divergent.len(),
        lost = report.total_lost(),
        "Trial batch complete"
    );
    Ok(report)
}

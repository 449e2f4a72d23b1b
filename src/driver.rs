/*!
 * Scenario Driver
 *
 * Runs each lesson once (counters in a repeated-trial loop) and collects a
 * report the binary can verify and print.
 */

use crate::compute::{launch, WorkSpec};
use crate::core::{LessonConfig, LessonError, LessonResult};
use crate::counter::{run_trials, Strategy, TrialReport, TrialSpec};
use crate::handoff::channel;
use crate::monitoring::{generate_run_id, ScenarioSpan};
use serde::{Deserialize, Serialize};
use std::thread;
use tracing::info;

/// Everything one driver run observed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverReport {
    pub run_id: String,
    pub computation: f64,
    pub handoff: i64,
    pub counters: Vec<TrialReport>,
}

impl DriverReport {
    /// Fail on the first counter report that breaks its invariant
    pub fn verify(&self) -> LessonResult<()> {
        self.counters.iter().try_for_each(TrialReport::verify)
    }

    /// Report for one strategy, if it was run
    pub fn counter(&self, strategy: Strategy) -> Option<&TrialReport> {
        self.counters.iter().find(|r| r.strategy == strategy)
    }
}

/// Run every scenario with `config`
///
/// Scenario errors abort the run. Counter divergences are collected, not
/// raised; call `DriverReport::verify` to judge them.
pub fn run_all(config: &LessonConfig) -> LessonResult<DriverReport> {
    config.validate()?;
    let run_id = generate_run_id();
    info!(run_id = %run_id, "Starting lesson run");

    let computation = scoped(&run_id, "computation", || run_computation(config))?;
    let handoff = scoped(&run_id, "handoff", || run_handoff(config))?;
    let counters = scoped(&run_id, "shared-counter", || run_counters(config))?;

    Ok(DriverReport {
        run_id,
        computation,
        handoff,
        counters,
    })
}

fn scoped<T, F>(run_id: &str, name: &'static str, f: F) -> LessonResult<T>
where
    F: FnOnce() -> LessonResult<T>,
{
    let span = ScenarioSpan::new(name, run_id);
    let result = {
        let _entered = span.enter();
        f()
    };
    span.record_result(result.is_ok());
    result
}

/// Sum of square roots over the configured range on a background thread
pub fn run_computation(config: &LessonConfig) -> LessonResult<f64> {
    let spec = WorkSpec::new(config.work_min, config.work_max)?;
    let mut handle = launch(spec)?;
    info!(min = spec.min(), max = spec.max(), "Computation triggered");

    handle.wait()?;
    let result = handle.result()?;
    info!(result, "Computation finished");
    Ok(result)
}

/// Producer thread hands one value to the blocked main thread
pub fn run_handoff(config: &LessonConfig) -> LessonResult<i64> {
    let (mut producer, mut consumer) = channel();
    let value = config.handoff_value;
    let delay = config.handoff_delay;

    let worker = thread::Builder::new()
        .name("handoff-producer".into())
        .spawn(move || {
            thread::sleep(delay);
            producer.send(value)
        })
        .map_err(|e| LessonError::launch("handoff producer", e))?;

    info!("Waiting for producer");
    let received = consumer.receive();

    worker
        .join()
        .map_err(|payload| LessonError::panicked("handoff producer", payload))??;
    let received = received?;

    if received != value {
        return Err(LessonError::PreconditionViolation(format!(
            "handoff delivered {} but {} was sent",
            received, value
        )));
    }
    info!(value = received, "Handoff received");
    Ok(received)
}

/// Repeated trials for every counter strategy
pub fn run_counters(config: &LessonConfig) -> LessonResult<Vec<TrialReport>> {
    let spec = TrialSpec::new(config.workers, config.increments);
    Strategy::ALL
        .iter()
        .map(|&strategy| run_trials(strategy, spec, config.trials))
        .collect()
}

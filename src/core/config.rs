/*!
 * Lesson Configuration
 *
 * Runtime configuration for the driver scenarios
 */

use super::errors::{LessonError, LessonResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

const ENV_WORKERS: &str = "LESSONS_WORKERS";
const ENV_INCREMENTS: &str = "LESSONS_INCREMENTS";
const ENV_TRIALS: &str = "LESSONS_TRIALS";
const ENV_WORK_MIN: &str = "LESSONS_WORK_MIN";
const ENV_WORK_MAX: &str = "LESSONS_WORK_MAX";
const ENV_HANDOFF_VALUE: &str = "LESSONS_HANDOFF_VALUE";
const ENV_HANDOFF_DELAY_MS: &str = "LESSONS_HANDOFF_DELAY_MS";

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonConfig {
    /// Concurrent workers per counter trial (K)
    pub workers: usize,
    /// Increments performed by each worker (N)
    pub increments: u64,
    /// Trials per counter strategy
    pub trials: usize,
    /// Lower bound of the computation range (inclusive)
    pub work_min: u64,
    /// Upper bound of the computation range (inclusive)
    pub work_max: u64,
    /// Value the producer hands to the consumer
    pub handoff_value: i64,
    /// How long the producer holds the value back before sending
    pub handoff_delay: Duration,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            increments: 1000,
            trials: 1000,
            work_min: 0,
            work_max: 1_000_000,
            handoff_value: 7,
            handoff_delay: Duration::from_millis(100),
        }
    }
}

impl LessonConfig {
    /// Small configuration for tests and smoke runs
    pub const fn quick() -> Self {
        Self {
            workers: 4,
            increments: 500,
            trials: 20,
            work_min: 0,
            work_max: 1_000,
            handoff_value: 7,
            handoff_delay: Duration::from_millis(5),
        }
    }

    /// Defaults overlaid with any `LESSONS_*` environment variables
    pub fn from_env() -> LessonResult<Self> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values produced by `lookup` onto this configuration
    ///
    /// Split out from `from_env` so tests can feed values without touching
    /// the process environment.
    pub fn overlay<F>(mut self, lookup: F) -> LessonResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, ENV_WORKERS)? {
            self.workers = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_INCREMENTS)? {
            self.increments = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_TRIALS)? {
            self.trials = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_WORK_MIN)? {
            self.work_min = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_WORK_MAX)? {
            self.work_max = v;
        }
        if let Some(v) = parse_var(&lookup, ENV_HANDOFF_VALUE)? {
            self.handoff_value = v;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_HANDOFF_DELAY_MS)? {
            self.handoff_delay = Duration::from_millis(ms);
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject configurations no scenario can run with
    pub fn validate(&self) -> LessonResult<()> {
        if self.workers == 0 {
            return Err(LessonError::Configuration(
                "workers must be at least 1".into(),
            ));
        }
        if self.work_min > self.work_max {
            return Err(LessonError::Configuration(format!(
                "work range is inverted: [{}, {}]",
                self.work_min, self.work_max
            )));
        }
        if (self.workers as u64).checked_mul(self.increments).is_none() {
            return Err(LessonError::Configuration(
                "workers * increments overflows the counter".into(),
            ));
        }
        Ok(())
    }

    /// Expected final counter value (K * N)
    #[inline]
    pub fn expected_total(&self) -> u64 {
        self.workers as u64 * self.increments
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> LessonResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| LessonError::Configuration(format!("{}={:?}: {}", key, raw, e))),
    }
}

/*!
 * Counter Traits
 *
 * Core abstraction for counters shared across worker threads
 */

use super::{CoarseLockCounter, ReducedLockCounter, UnsyncCounter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutation discipline applied to a shared counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Separate load and store per increment, no mutual exclusion
    Unsynchronized,
    /// Mutex held across the whole increment loop
    CoarseLock,
    /// Local accumulation, mutex held only for the final addition
    ReducedCriticalSection,
}

impl Strategy {
    /// Every strategy, in the order the driver runs them
    pub const ALL: [Strategy; 3] = [
        Strategy::Unsynchronized,
        Strategy::CoarseLock,
        Strategy::ReducedCriticalSection,
    ];

    /// Whether every trial must end at exactly K * N
    #[inline]
    pub const fn must_hold_invariant(self) -> bool {
        !matches!(self, Strategy::Unsynchronized)
    }

    /// Stable name used in logs and reports
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Unsynchronized => "unsynchronized",
            Strategy::CoarseLock => "coarse-lock",
            Strategy::ReducedCriticalSection => "reduced-critical-section",
        }
    }

    /// Fresh counter at zero using this strategy
    pub fn new_counter(self) -> Box<dyn SharedCounter> {
        match self {
            Strategy::Unsynchronized => Box::new(UnsyncCounter::new()),
            Strategy::CoarseLock => Box::new(CoarseLockCounter::new()),
            Strategy::ReducedCriticalSection => Box::new(ReducedLockCounter::new()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer shared by concurrently running workers
///
/// `increment_by` is the only mutation entry point. The coordinator calls
/// `read` after every worker has been joined.
pub trait SharedCounter: Send + Sync {
    /// Add `n` to the counter, one unit at a time from the caller's view
    fn increment_by(&self, n: u64);

    /// Current value
    fn read(&self) -> u64;

    /// Discipline this counter applies
    fn strategy(&self) -> Strategy;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_match_serde() {
        for strategy in Strategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.name()));
        }
    }

    #[test]
    fn test_new_counter_reports_strategy() {
        for strategy in Strategy::ALL {
            let counter = strategy.new_counter();
            assert_eq!(counter.strategy(), strategy);
            assert_eq!(counter.read(), 0);
        }
    }

    #[test]
    fn test_only_unsynchronized_may_diverge() {
        assert!(!Strategy::Unsynchronized.must_hold_invariant());
        assert!(Strategy::CoarseLock.must_hold_invariant());
        assert!(Strategy::ReducedCriticalSection.must_hold_invariant());
    }
}

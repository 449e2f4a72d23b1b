/*!
 * Coarse Lock Counter
 *
 * Mutex held for the entire increment loop
 */

use super::traits::{SharedCounter, Strategy};
use parking_lot::Mutex;

/// Counter that serializes whole `increment_by` calls
///
/// The guard is acquired before the loop and released when it goes out of
/// scope, on every exit path including unwinding.
#[derive(Debug, Default)]
pub struct CoarseLockCounter {
    value: Mutex<u64>,
}

impl CoarseLockCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedCounter for CoarseLockCounter {
    fn increment_by(&self, n: u64) {
        let mut value = self.value.lock();
        for _ in 0..n {
            *value += 1;
        }
    }

    #[inline]
    fn read(&self) -> u64 {
        *self.value.lock()
    }

    fn strategy(&self) -> Strategy {
        Strategy::CoarseLock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_released_after_increment() {
        let counter = CoarseLockCounter::new();
        counter.increment_by(10);
        assert!(counter.value.try_lock().is_some());
        assert_eq!(counter.read(), 10);
    }

    /// Overflow inside the loop panics only when overflow checks are on
    #[test]
    #[cfg(debug_assertions)]
    fn test_increment_by_releases_lock_when_loop_panics() {
        let counter = CoarseLockCounter {
            value: Mutex::new(u64::MAX - 1),
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| counter.increment_by(5)));

        assert!(result.is_err());
        assert!(counter.value.try_lock().is_some());
        assert_eq!(counter.read(), u64::MAX);
    }

    #[test]
    fn test_guard_released_when_holder_unwinds() {
        let counter = Arc::new(CoarseLockCounter::new());
        let counter_clone = counter.clone();

        let result = thread::spawn(move || {
            let _guard = counter_clone.value.lock();
            panic!("worker failed while holding the lock");
        })
        .join();

        assert!(result.is_err());
        counter.increment_by(3);
        assert_eq!(counter.read(), 3);
    }
}

/*!
 * Unsynchronized Counter
 *
 * Negative control: read-modify-write without mutual exclusion
 */

use super::traits::{SharedCounter, Strategy};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter whose increments can be lost under contention
///
/// Each step loads the value and stores `value + 1` as two separate relaxed
/// operations. Another worker's store can land between them and get
/// overwritten. The atomic cell keeps this a logical race rather than a data
/// race, so the final value is always `<= K * N` and never torn.
#[derive(Debug, Default)]
pub struct UnsyncCounter {
    value: AtomicU64,
}

impl UnsyncCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedCounter for UnsyncCounter {
    fn increment_by(&self, n: u64) {
        for _ in 0..n {
            let current = self.value.load(Ordering::Relaxed);
            self.value.store(current + 1, Ordering::Relaxed);
        }
    }

    #[inline]
    fn read(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Unsynchronized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_thread_is_exact() {
        let counter = UnsyncCounter::new();
        counter.increment_by(1000);
        counter.increment_by(1);
        assert_eq!(counter.read(), 1001);
    }
}

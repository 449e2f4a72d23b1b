/*!
 * Handoff Slot
 *
 * Shared single-value cell behind both channel ends
 */

use parking_lot::{Condvar, Mutex};

/// Lifecycle of the value cell
#[derive(Debug)]
pub(super) enum SlotState<T> {
    /// No value yet, producer still alive
    Empty,
    /// Producer sent, consumer has not taken it
    Filled(T),
    /// Consumer took the value
    Consumed,
    /// Producer dropped without sending
    Abandoned,
}

/// Outcome of a single take attempt
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Take<T> {
    Ready(T),
    Pending,
    Abandoned,
    AlreadyConsumed,
}

pub(super) struct Slot<T> {
    state: Mutex<SlotState<T>>,
    filled: Condvar,
}

impl<T> Slot<T> {
    pub(super) fn new() -> Self {
        Self {
            state: Mutex::new(SlotState::Empty),
            filled: Condvar::new(),
        }
    }

    /// Store the value and wake the consumer
    ///
    /// Callers guarantee this runs at most once per slot.
    pub(super) fn fill(&self, value: T) {
        let mut state = self.state.lock();
        if let SlotState::Empty = *state {
            *state = SlotState::Filled(value);
        }
        drop(state);
        self.filled.notify_one();
    }

    /// Mark the slot abandoned if nothing was ever sent
    pub(super) fn abandon(&self) {
        let mut state = self.state.lock();
        if let SlotState::Empty = *state {
            *state = SlotState::Abandoned;
        }
        drop(state);
        self.filled.notify_one();
    }

    /// Take the value without blocking
    pub(super) fn try_take(&self) -> Take<T> {
        let mut state = self.state.lock();
        Self::take_locked(&mut state)
    }

    /// Block until the slot leaves `Empty`, then take
    pub(super) fn take_blocking(&self) -> Take<T> {
        let mut state = self.state.lock();
        while let SlotState::Empty = *state {
            self.filled.wait(&mut state);
        }
        Self::take_locked(&mut state)
    }

    fn take_locked(state: &mut SlotState<T>) -> Take<T> {
        match std::mem::replace(state, SlotState::Consumed) {
            SlotState::Filled(value) => Take::Ready(value),
            SlotState::Empty => {
                *state = SlotState::Empty;
                Take::Pending
            }
            SlotState::Abandoned => {
                *state = SlotState::Abandoned;
                Take::Abandoned
            }
            SlotState::Consumed => Take::AlreadyConsumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_transitions() {
        let slot = Slot::new();
        assert_eq!(slot.try_take(), Take::Pending);

        slot.fill(11);
        assert_eq!(slot.try_take(), Take::Ready(11));
        assert_eq!(slot.try_take(), Take::AlreadyConsumed);
    }

    #[test]
    fn test_abandon_after_fill_keeps_value() {
        let slot = Slot::new();
        slot.fill("kept");
        slot.abandon();
        assert_eq!(slot.take_blocking(), Take::Ready("kept"));
    }

    #[test]
    fn test_abandoned_slot_is_sticky() {
        let slot: Slot<u8> = Slot::new();
        slot.abandon();
        assert_eq!(slot.take_blocking(), Take::Abandoned);
        assert_eq!(slot.try_take(), Take::Abandoned);
    }
}

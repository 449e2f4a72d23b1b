/*!
 * Channel Ends
 *
 * Producer and consumer halves of a one-shot handoff
 */

use super::slot::{Slot, Take};
use crate::core::{LessonError, LessonResult};
use std::sync::Arc;

/// Sending half; may send exactly once
pub struct ProducerEnd<T> {
    slot: Arc<Slot<T>>,
    sent: bool,
}

/// Receiving half; may receive exactly once
pub struct ConsumerEnd<T> {
    slot: Arc<Slot<T>>,
    received: bool,
}

/// Create a linked producer/consumer pair
pub fn channel<T>() -> (ProducerEnd<T>, ConsumerEnd<T>) {
    let slot = Arc::new(Slot::new());
    (
        ProducerEnd {
            slot: slot.clone(),
            sent: false,
        },
        ConsumerEnd {
            slot,
            received: false,
        },
    )
}

impl<T> ProducerEnd<T> {
    /// Hand `value` to the consumer
    ///
    /// # Errors
    ///
    /// A second call returns `PreconditionViolation`; the first value stays.
    pub fn send(&mut self, value: T) -> LessonResult<()> {
        if self.sent {
            return Err(LessonError::PreconditionViolation(
                "channel already used: send() called twice".into(),
            ));
        }
        self.sent = true;
        self.slot.fill(value);
        Ok(())
    }

    /// Whether the consumer end has been dropped
    ///
    /// Sending still succeeds; the value is dropped with the slot.
    pub fn is_consumer_gone(&self) -> bool {
        Arc::strong_count(&self.slot) == 1
    }

    #[inline]
    pub fn is_sent(&self) -> bool {
        self.sent
    }
}

impl<T> Drop for ProducerEnd<T> {
    fn drop(&mut self) {
        if !self.sent {
            self.slot.abandon();
        }
    }
}

impl<T> ConsumerEnd<T> {
    /// Block until the producer sends, then return the value
    ///
    /// # Errors
    ///
    /// - `AbandonedProducer` if the producer dropped without sending
    /// - `PreconditionViolation` on a second call after a value was received
    pub fn receive(&mut self) -> LessonResult<T> {
        self.ensure_unused()?;
        let take = self.slot.take_blocking();
        self.settle(take)?
            .ok_or_else(|| LessonError::PreconditionViolation("slot still empty after wake".into()))
    }

    /// Take the value if it has already been sent
    ///
    /// Returns `Ok(None)` while the producer has not sent yet.
    pub fn try_receive(&mut self) -> LessonResult<Option<T>> {
        self.ensure_unused()?;
        let take = self.slot.try_take();
        self.settle(take)
    }

    #[inline]
    pub fn is_received(&self) -> bool {
        self.received
    }

    fn ensure_unused(&self) -> LessonResult<()> {
        if self.received {
            return Err(LessonError::PreconditionViolation(
                "channel already used: value was already received".into(),
            ));
        }
        Ok(())
    }

    fn settle(&mut self, take: Take<T>) -> LessonResult<Option<T>> {
        match take {
            Take::Ready(value) => {
                self.received = true;
                Ok(Some(value))
            }
            Take::Pending => Ok(None),
            Take::Abandoned => Err(LessonError::AbandonedProducer),
            Take::AlreadyConsumed => Err(LessonError::PreconditionViolation(
                "channel already used: value was already received".into(),
            )),
        }
    }
}

impl<T> std::fmt::Debug for ProducerEnd<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProducerEnd").field("sent", &self.sent).finish()
    }
}

impl<T> std::fmt::Debug for ConsumerEnd<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumerEnd")
            .field("received", &self.received)
            .finish()
    }
}

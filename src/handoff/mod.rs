/*!
 * One-Shot Handoff
 *
 * Single-use channel carrying exactly one value from one producer to one
 * consumer.
 *
 * ## Contract
 *
 * - `send` moves the slot from empty to filled, once
 * - `receive` blocks until the slot is filled, then takes the value, once
 * - Dropping the producer without sending wakes the consumer with
 *   `AbandonedProducer`
 *
 * Repeated `send` or `receive` calls fail with `PreconditionViolation`.
 * The value becomes visible to the consumer under the slot mutex, so
 * `receive` never observes a value before `send` has finished storing it.
 *
 * ## Example
 *
 * ```rust
 * use sync_lessons::handoff::channel;
 *
 * let (mut producer, mut consumer) = channel();
 * let worker = std::thread::spawn(move || producer.send(7));
 * assert_eq!(consumer.receive()?, 7);
 * worker.join().unwrap()?;
 * # Ok::<(), sync_lessons::LessonError>(())
 * ```
 */

mod ends;
mod slot;

pub use ends::{channel, ConsumerEnd, ProducerEnd};

/*!
 * One-Shot Handoff Tests
 * Tests for single-use producer/consumer channels across threads
 */

use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use sync_lessons::handoff::{channel, ConsumerEnd};
use sync_lessons::{LessonError, LessonResult};

#[test]
fn test_receive_blocks_until_send() {
    let (mut producer, mut consumer) = channel();
    let sent = Arc::new(AtomicBool::new(false));
    let sent_clone = sent.clone();

    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        sent_clone.store(true, Ordering::SeqCst);
        producer.send(7).unwrap();
    });

    let value = consumer.receive().unwrap();
    assert_eq!(value, 7);
    assert!(sent.load(Ordering::SeqCst), "receive returned before send");

    handle.join().unwrap();
}

#[test]
fn test_handoff_of_owned_values() {
    #[derive(Debug, Clone, PartialEq)]
    struct Payload {
        id: u64,
        name: String,
        data: Vec<u8>,
    }

    let expected = Payload {
        id: 42,
        name: "lesson".to_string(),
        data: vec![1, 2, 3],
    };

    let (mut producer, mut consumer) = channel();
    let to_send = expected.clone();
    let handle = thread::spawn(move || producer.send(to_send));

    assert_eq!(consumer.receive().unwrap(), expected);
    handle.join().unwrap().unwrap();
}

#[test]
fn test_second_send_is_rejected() {
    let (mut producer, mut consumer) = channel();
    producer.send("first").unwrap();

    let err = producer.send("second").unwrap_err();
    assert!(matches!(err, LessonError::PreconditionViolation(_)));

    // The first value survives the rejected overwrite
    assert_eq!(consumer.receive().unwrap(), "first");
}

#[test]
fn test_second_receive_is_rejected() {
    let (mut producer, mut consumer) = channel();
    producer.send(1u8).unwrap();

    assert_eq!(consumer.receive().unwrap(), 1);
    assert!(matches!(
        consumer.receive(),
        Err(LessonError::PreconditionViolation(_))
    ));
}

#[test]
fn test_dropped_producer_before_receive() {
    let (producer, mut consumer) = channel::<u32>();
    drop(producer);

    assert_eq!(consumer.receive(), Err(LessonError::AbandonedProducer));
}

#[test]
fn test_dropped_producer_after_send_still_delivers() {
    let (mut producer, mut consumer) = channel();
    producer.send(99i64).unwrap();
    drop(producer);

    assert_eq!(consumer.receive().unwrap(), 99);
}

/// Run `receive` on a detached thread and give up after `limit`
///
/// A hung consumer stays parked on its own thread, so the test still fails
/// instead of blocking the harness.
fn receive_within<T: Send + 'static>(
    mut consumer: ConsumerEnd<T>,
    limit: Duration,
) -> Option<LessonResult<T>> {
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = done_tx.send(consumer.receive());
    });
    done_rx.recv_timeout(limit).ok()
}

#[test]
fn test_abandoned_producer_wakes_blocked_consumer() {
    let (producer, consumer) = channel::<String>();
    let (done_tx, done_rx) = mpsc::channel();

    thread::spawn(move || {
        let mut consumer = consumer;
        let _ = done_tx.send(consumer.receive());
    });

    // Let the consumer park before abandoning
    thread::sleep(Duration::from_millis(50));
    assert!(done_rx.try_recv().is_err(), "receive returned before abandonment");
    thread::spawn(move || drop(producer)).join().unwrap();

    let result = done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("receive hung after the producer was dropped");
    assert_eq!(result, Err(LessonError::AbandonedProducer));
}

#[test]
fn test_producer_thread_panics_before_send() {
    let (producer, consumer) = channel::<u64>();

    let failed = thread::spawn(move || {
        let _producer = producer;
        panic!("producer failed before sending");
    });
    assert!(failed.join().is_err());

    let result = receive_within(consumer, Duration::from_secs(5))
        .expect("receive hung after the producer panicked");
    assert_eq!(result, Err(LessonError::AbandonedProducer));
}

#[test]
fn test_bounded_wait_reports_a_stuck_consumer() {
    let (producer, consumer) = channel::<u8>();

    // Producer alive and silent: the consumer must still be waiting
    assert!(receive_within(consumer, Duration::from_millis(100)).is_none());
    drop(producer);
}

#[test]
fn test_many_independent_handoffs() {
    let handles: Vec<_> = (0..16u64)
        .map(|i| {
            let (mut producer, mut consumer) = channel();
            let sender = thread::spawn(move || producer.send(i * i));
            let receiver = thread::spawn(move || consumer.receive());
            (i, sender, receiver)
        })
        .collect();

    for (i, sender, receiver) in handles {
        sender.join().unwrap().unwrap();
        assert_eq!(receiver.join().unwrap().unwrap(), i * i);
    }
}

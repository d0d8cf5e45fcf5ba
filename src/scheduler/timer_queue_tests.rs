//! Tests for timer_queue

use super::*;
use proptest::prelude::*;

#[test]
fn test_new_queue_is_empty() {
    let queue: TimerQueue<()> = TimerQueue::new();
    assert!(queue.is_empty());
    assert_eq!(queue.next_deadline(), None);
}

#[test]
fn test_drain_due_in_deadline_order() {
    let mut queue = TimerQueue::new();
    queue.push(Duration::from_secs(3), "c");
    queue.push(Duration::from_secs(1), "a");
    queue.push(Duration::from_secs(2), "b");

    assert_eq!(queue.drain_due(Duration::from_secs(2)), vec!["a", "b"]);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.next_deadline(), Some(Duration::from_secs(3)));
}

#[test]
fn test_equal_deadlines_keep_schedule_order() {
    let mut queue = TimerQueue::new();
    queue.push(Duration::from_secs(7), 1);
    queue.push(Duration::from_secs(7), 2);
    queue.push(Duration::from_secs(7), 3);

    assert_eq!(queue.drain_due(Duration::from_secs(7)), vec![1, 2, 3]);
}

#[test]
fn test_cancel_removes_only_that_task() {
    let mut queue = TimerQueue::new();
    let first = queue.push(Duration::from_secs(1), "first");
    queue.push(Duration::from_secs(1), "second");

    assert!(queue.cancel(first));
    assert_eq!(queue.drain_due(Duration::from_secs(1)), vec!["second"]);
}

#[test]
fn test_cancel_after_drain_is_false() {
    let mut queue = TimerQueue::new();
    let token = queue.push(Duration::ZERO, ());
    queue.drain_due(Duration::ZERO);
    assert!(!queue.cancel(token));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Draining at any time returns exactly the tasks whose deadline has
    /// passed, sorted by deadline, and leaves the rest pending.
    #[test]
    fn prop_drain_due_partitions_by_deadline(
        deadlines in prop::collection::vec(0u64..10_000, 0..30),
        now in 0u64..10_000
    ) {
        let mut queue = TimerQueue::new();
        for (i, ms) in deadlines.iter().enumerate() {
            queue.push(Duration::from_millis(*ms), (*ms, i));
        }

        let due = queue.drain_due(Duration::from_millis(now));

        let mut expected: Vec<(u64, usize)> = deadlines
            .iter()
            .enumerate()
            .filter(|(_, ms)| **ms <= now)
            .map(|(i, ms)| (*ms, i))
            .collect();
        expected.sort();

        prop_assert_eq!(due, expected);
        prop_assert_eq!(
            queue.len(),
            deadlines.iter().filter(|ms| **ms > now).count()
        );
    }
}

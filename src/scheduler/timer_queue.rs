use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::TimerToken;

/// Deadline-ordered task storage shared by the scheduler implementations.
///
/// Tasks with equal deadlines come due in the order they were scheduled.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_seq: u64,
    entries: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    pub fn push(&mut self, deadline: Duration, task: T) -> TimerToken {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((deadline, seq), task);
        self.deadlines.insert(seq, deadline);
        TimerToken(seq)
    }

    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.deadlines.remove(&token.0) {
            Some(deadline) => self.entries.remove(&(deadline, token.0)).is_some(),
            None => false,
        }
    }

    /// Remove every task with `deadline <= now`, earliest first
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(entry) = self.entries.first_entry() {
            let (deadline, seq) = *entry.key();
            if deadline > now {
                break;
            }
            due.push(entry.remove());
            self.deadlines.remove(&seq);
        }
        due
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "timer_queue_tests.rs"]
mod timer_queue_tests;

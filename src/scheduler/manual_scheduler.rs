use std::time::Duration;

use super::{Scheduler, TimerQueue, TimerToken};

/// Scheduler whose clock only moves when [`advance`](Self::advance) is called
#[derive(Debug)]
pub struct ManualScheduler<T> {
    now: Duration,
    queue: TimerQueue<T>,
}

impl<T> Default for ManualScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ManualScheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            queue: TimerQueue::new(),
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }
}

impl<T> Scheduler<T> for ManualScheduler<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, task: T) -> TimerToken {
        self.queue.push(self.now + delay, task)
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        self.queue.cancel(token)
    }

    fn take_due(&mut self) -> Vec<T> {
        self.queue.drain_due(self.now)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

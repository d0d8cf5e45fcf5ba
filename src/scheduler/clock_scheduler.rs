use std::time::{Duration, Instant};

use super::{Scheduler, TimerQueue, TimerToken};

/// Scheduler following the monotonic wall clock
#[derive(Debug)]
pub struct ClockScheduler<T> {
    epoch: Instant,
    queue: TimerQueue<T>,
}

impl<T> Default for ClockScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ClockScheduler<T> {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            queue: TimerQueue::new(),
        }
    }

    /// Time left until the earliest task comes due; zero if one is overdue
    pub fn time_until_next(&self) -> Option<Duration> {
        self.queue
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now()))
    }
}

impl<T> Scheduler<T> for ClockScheduler<T> {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn schedule(&mut self, delay: Duration, task: T) -> TimerToken {
        let deadline = self.now() + delay;
        self.queue.push(deadline, task)
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        self.queue.cancel(token)
    }

    fn take_due(&mut self) -> Vec<T> {
        let now = self.now();
        self.queue.drain_due(now)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

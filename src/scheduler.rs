//! Deferred tasks
//!
//! Components never sleep or spawn timers themselves. They hand a task to a
//! [`Scheduler`] together with a delay, and the event loop periodically drains
//! the tasks that have come due. [`ManualScheduler`] advances only when told
//! to, which makes timing behavior deterministic in tests; [`ClockScheduler`]
//! follows the wall clock.

mod clock_scheduler;
mod manual_scheduler;
mod timer_queue;

pub use clock_scheduler::ClockScheduler;
pub use manual_scheduler::ManualScheduler;
pub use timer_queue::TimerQueue;

use std::time::Duration;

/// Token returned by [`Scheduler::schedule`], used to cancel the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

/// Fire-once deferred task queue driven by the caller
pub trait Scheduler<T> {
    /// Time elapsed since the scheduler was created
    fn now(&self) -> Duration;

    /// Queue `task` to come due `delay` from now
    fn schedule(&mut self, delay: Duration, task: T) -> TimerToken;

    /// Drop a pending task. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, token: TimerToken) -> bool;

    /// Remove and return every task whose deadline is at or before `now()`,
    /// earliest deadline first
    fn take_due(&mut self) -> Vec<T>;

    /// Number of tasks still waiting
    fn pending(&self) -> usize;
}

//! Cooperative deferred task scheduler.
//!
//! Tasks are small value descriptors: a deadline and an opaque payload. The owner passes
//! the callback to [`Scheduler::tick`], so nothing is captured across the scheduling boundary
//! and cancelling a task is removing it from the pool.

use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Max number of live deferred tasks
pub const MAX_DEFERRED_TASKS: usize = 4;

/// Handle returned by [`Scheduler::schedule`], used to cancel the task
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskToken(u16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// All task slots are taken, the new task is rejected and existing tasks are kept
    Full,
}

#[derive(Debug)]
struct Task<T> {
    token: TaskToken,
    deadline: Instant,
    payload: T,
}

#[derive(Debug)]
pub struct Scheduler<T, const N: usize = MAX_DEFERRED_TASKS> {
    tasks: Vec<Task<T>, N>,
    next_token: u16,
}

impl<T, const N: usize> Default for Scheduler<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Scheduler<T, N> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_token: 0,
        }
    }

    /// Schedule `payload` to fire `delay` after `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> Result<TaskToken, SchedulerError> {
        let token = TaskToken(self.next_token);
        let task = Task {
            token,
            deadline: now + delay,
            payload,
        };
        if self.tasks.push(task).is_err() {
            error!("Deferred task pool is full, dropping the new task");
            return Err(SchedulerError::Full);
        }
        self.next_token = self.next_token.wrapping_add(1);
        Ok(token)
    }

    /// Cancel a task. Once this returns, the task never fires again.
    ///
    /// Returns `false` if the task was already gone, which is not an error.
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        match self.tasks.iter().position(|t| t.token == token) {
            Some(i) => {
                self.tasks.remove(i);
                true
            }
            None => false,
        }
    }

    /// Fire every task whose deadline is not after `now`, earliest first.
    ///
    /// `fire` returns the delay until the next run of the task, measured from `now`.
    /// `None` or a zero delay removes the task.
    pub fn tick<F>(&mut self, now: Instant, mut fire: F)
    where
        F: FnMut(&mut T) -> Option<Duration>,
    {
        self.tasks.sort_unstable_by_key(|t| t.deadline);
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].deadline > now {
                break;
            }
            match fire(&mut self.tasks[i].payload) {
                Some(delay) if delay > Duration::from_ticks(0) => {
                    self.tasks[i].deadline = now + delay;
                    i += 1;
                }
                _ => {
                    self.tasks.remove(i);
                }
            }
        }
    }

    /// Number of live tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Deadline of the next task to fire
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|t| t.deadline).min()
    }
}

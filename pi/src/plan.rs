//! Splitting `[0, 1]` and the step budget evenly across workers.

use crate::error::{InputFault, PiError, Result};

/// Upper bound on the worker count. Every worker is a dedicated thread or blocking task.
pub const MAX_WORKERS: usize = 1 << 16;

/// A worker's slice of the integration domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// One worker's share of the job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub index: usize,
    pub interval: Interval,
    pub steps: u64,
}

/// Fixed split of `total_steps` over `workers` equal sub-intervals.
///
/// Steps per worker come from truncating division. The remainder is dropped rather than
/// handed to any worker, so `computed_steps()` can be lower than what was requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkPlan {
    total_steps: u64,
    workers: usize,
    steps_per_worker: u64,
    range_per_worker: f64,
}

impl WorkPlan {
    pub fn new(total_steps: u64, workers: usize) -> Result<Self> {
        if total_steps == 0 {
            return Err(PiError::invalid(InputFault::NonPositive(total_steps.to_string())));
        }
        if workers == 0 {
            return Err(PiError::invalid(InputFault::NonPositive(workers.to_string())));
        }
        if workers > MAX_WORKERS {
            return Err(PiError::invalid(InputFault::OutOfRange(workers.to_string())));
        }

        let steps_per_worker = total_steps / workers as u64;
        if steps_per_worker == 0 {
            return Err(PiError::invalid(InputFault::TooFewSteps { total_steps, workers }));
        }

        Ok(WorkPlan {
            total_steps,
            workers,
            steps_per_worker,
            range_per_worker: 1.0 / workers as f64,
        })
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn steps_per_worker(&self) -> u64 {
        self.steps_per_worker
    }

    pub fn range_per_worker(&self) -> f64 {
        self.range_per_worker
    }

    /// Steps that actually get evaluated.
    pub fn computed_steps(&self) -> u64 {
        self.steps_per_worker * self.workers as u64
    }

    pub fn dropped_steps(&self) -> u64 {
        self.total_steps % self.workers as u64
    }

    pub fn assignment(&self, index: usize) -> Assignment {
        let i = index as f64;
        Assignment {
            index,
            interval: Interval {
                start: i * self.range_per_worker,
                end: (i + 1.0) * self.range_per_worker,
            },
            steps: self.steps_per_worker,
        }
    }

    pub fn assignments(&self) -> impl Iterator<Item = Assignment> + '_ {
        (0..self.workers).map(move |index| self.assignment(index))
    }
}

//! Runs one OS thread per assignment and combines the partial integrals.

use std::any::Any;
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{PiError, Result};
use crate::integral::partial_integral;
use crate::plan::{Assignment, WorkPlan};

/// How partial results are combined into the final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Reduction {
    /// Each worker adds into a shared accumulator behind a mutex. The summation order follows
    /// lock acquisition, so the last bits can differ between runs.
    #[default]
    Locked,
    /// Partial results are collected by worker index and summed in that order after joining.
    /// Runs are bit-reproducible.
    Ordered,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub value: f64,
    /// Wall-clock time from the first dispatch to the last join.
    pub elapsed: Duration,
}

pub fn integrate(plan: &WorkPlan, reduction: Reduction) -> Result<Estimate> {
    let start = Instant::now();
    let value = match reduction {
        Reduction::Locked => locked_sum(plan)?,
        Reduction::Ordered => ordered_sum(plan)?,
    };
    let elapsed = start.elapsed();

    info!(
        workers = plan.workers(),
        computed_steps = plan.computed_steps(),
        dropped_steps = plan.dropped_steps(),
        ?reduction,
        ?elapsed,
        value,
        "integration finished"
    );
    Ok(Estimate { value, elapsed })
}

/// Evaluates one assignment. Shared by both front ends.
pub fn compute(assignment: Assignment) -> f64 {
    let Assignment { interval, steps, .. } = assignment;
    partial_integral(interval.start, interval.end, steps)
}

fn locked_sum(plan: &WorkPlan) -> Result<f64> {
    let total = Mutex::new(0.0_f64);
    run_scoped(plan, |assignment| {
        let partial = compute(assignment);
        // lock is held only for the add
        *total.lock().unwrap_or_else(PoisonError::into_inner) += partial;
        debug!(worker = assignment.index, partial, "contributed");
    })?;
    Ok(total.into_inner().unwrap_or_else(PoisonError::into_inner))
}

fn ordered_sum(plan: &WorkPlan) -> Result<f64> {
    let partials = run_scoped(plan, |assignment| {
        let partial = compute(assignment);
        debug!(worker = assignment.index, partial, "computed");
        partial
    })?;
    Ok(partials.iter().fold(0.0, |acc, partial| acc + partial))
}

/// Spawns a named thread per assignment inside a scope and joins every one of them.
///
/// Results come back in worker-index order. If spawning or any worker fails, the threads that
/// did start are still joined before the first error is returned.
fn run_scoped<T, F>(plan: &WorkPlan, work: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(Assignment) -> T + Sync,
{
    let work = &work;
    thread::scope(|scope| {
        let mut handles = Vec::new();
        let mut failure = None;

        for assignment in plan.assignments() {
            debug!(
                worker = assignment.index,
                start = assignment.interval.start,
                end = assignment.interval.end,
                steps = assignment.steps,
                "dispatching"
            );
            let spawned = thread::Builder::new()
                .name(format!("pi-worker-{}", assignment.index))
                .spawn_scoped(scope, move || work(assignment));
            match spawned {
                Ok(handle) => handles.push((assignment.index, handle)),
                Err(source) => {
                    failure = Some(PiError::Spawn {
                        index: assignment.index,
                        source,
                    });
                    break;
                }
            }
        }

        let mut results = Vec::new();
        for (index, handle) in handles {
            match handle.join() {
                Ok(value) => results.push(value),
                Err(payload) => {
                    failure.get_or_insert_with(|| PiError::WorkerFailed {
                        index,
                        reason: panic_reason(payload.as_ref()),
                    });
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(results),
        }
    })
}

/// Best-effort text of a panic payload.
pub fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn locked_reduction_approximates_pi() {
        let plan = WorkPlan::new(1_000_000, 4).unwrap();
        let estimate = integrate(&plan, Reduction::Locked).unwrap();
        assert!((estimate.value - PI).abs() < 1e-9, "got {}", estimate.value);
        assert!(estimate.elapsed > Duration::ZERO);
    }

    #[test]
    fn ordered_reduction_matches_sequential_sum() {
        let plan = WorkPlan::new(120_000, 6).unwrap();
        let expected = plan.assignments().map(compute).fold(0.0, |acc, p| acc + p);
        let first = integrate(&plan, Reduction::Ordered).unwrap();
        let second = integrate(&plan, Reduction::Ordered).unwrap();
        assert_eq!(first.value.to_bits(), expected.to_bits());
        assert_eq!(first.value.to_bits(), second.value.to_bits());
    }

    #[test]
    fn both_reductions_agree_within_rounding() {
        let plan = WorkPlan::new(500_000, 8).unwrap();
        let locked = integrate(&plan, Reduction::Locked).unwrap().value;
        let ordered = integrate(&plan, Reduction::Ordered).unwrap().value;
        assert!((locked - ordered).abs() < 1e-12);
    }

    #[test]
    fn one_worker_equals_direct_integration() {
        let plan = WorkPlan::new(250_000, 1).unwrap();
        let direct = partial_integral(0.0, 1.0, 250_000);
        for reduction in [Reduction::Locked, Reduction::Ordered] {
            let estimate = integrate(&plan, reduction).unwrap();
            assert_eq!(estimate.value.to_bits(), direct.to_bits());
        }
    }

    #[test]
    fn truncated_plan_only_evaluates_computed_steps() {
        // 10 steps over 3 workers: 3 steps each, the tenth is never evaluated
        let plan = WorkPlan::new(10, 3).unwrap();
        let estimate = integrate(&plan, Reduction::Ordered).unwrap();
        let expected: f64 = (0..3)
            .map(|i| {
                let r = 1.0 / 3.0;
                partial_integral(i as f64 * r, (i as f64 + 1.0) * r, 3)
            })
            .fold(0.0, |acc, p| acc + p);
        assert_eq!(estimate.value.to_bits(), expected.to_bits());
        assert!((estimate.value - PI).abs() < 1e-2);
    }

    #[test]
    fn every_worker_contributes_exactly_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        let plan = WorkPlan::new(64, 16).unwrap();
        let calls = AtomicUsize::new(0);
        let seen = run_scoped(&plan, |assignment| {
            calls.fetch_add(1, Ordering::SeqCst);
            assignment.index
        })
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 16);
        assert_eq!(seen, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn panicking_worker_is_reported_after_all_join() {
        let plan = WorkPlan::new(40, 4).unwrap();
        let err = run_scoped(&plan, |assignment| {
            if assignment.index == 2 {
                panic!("boom");
            }
        })
        .unwrap_err();
        match err {
            PiError::WorkerFailed { index, reason } => {
                assert_eq!(index, 2);
                assert_eq!(reason, "boom");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

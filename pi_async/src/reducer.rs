use std::sync::Arc;
use std::time::Instant;

use pi_integral::reducer::panic_reason;
use pi_integral::{compute, Estimate, PiError, Reduction, Result, WorkPlan};
use tokio::sync::Mutex;
use tokio::task::{self, JoinError, JoinHandle};
use tracing::{debug, info};

/// Async counterpart of `pi_integral::integrate`.
///
/// Each assignment runs on tokio's blocking pool since the integration loop never yields.
/// Every handle is awaited before returning.
pub async fn integrate(plan: &WorkPlan, reduction: Reduction) -> Result<Estimate> {
    let start = Instant::now();
    let value = match reduction {
        Reduction::Locked => locked_sum(plan).await?,
        Reduction::Ordered => ordered_sum(plan).await?,
    };
    let elapsed = start.elapsed();

    info!(
        tasks = plan.workers(),
        computed_steps = plan.computed_steps(),
        dropped_steps = plan.dropped_steps(),
        ?reduction,
        ?elapsed,
        value,
        "integration finished"
    );
    Ok(Estimate { value, elapsed })
}

async fn locked_sum(plan: &WorkPlan) -> Result<f64> {
    let total = Arc::new(Mutex::new(0.0_f64));

    let mut tasks = Vec::new();
    for assignment in plan.assignments() {
        let total = Arc::clone(&total);
        debug!(task = assignment.index, steps = assignment.steps, "dispatching");
        let task = task::spawn(async move {
            let partial = task::spawn_blocking(move || compute(assignment)).await?;
            *total.lock().await += partial;
            debug!(task = assignment.index, partial, "contributed");
            Ok::<(), JoinError>(())
        });
        tasks.push((assignment.index, task));
    }

    let mut failure = None;
    for (index, task) in tasks {
        if let Err(err) = task.await.and_then(|inner| inner) {
            failure.get_or_insert_with(|| task_failed(index, err));
        }
    }
    if let Some(err) = failure {
        return Err(err);
    }

    let total = total.lock().await;
    Ok(*total)
}

async fn ordered_sum(plan: &WorkPlan) -> Result<f64> {
    let mut tasks: Vec<(usize, JoinHandle<f64>)> = Vec::new();
    for assignment in plan.assignments() {
        debug!(task = assignment.index, steps = assignment.steps, "dispatching");
        tasks.push((assignment.index, task::spawn_blocking(move || compute(assignment))));
    }

    let mut sum = 0.0;
    let mut failure = None;
    for (index, task) in tasks {
        match task.await {
            Ok(partial) => sum += partial,
            Err(err) => {
                failure.get_or_insert_with(|| task_failed(index, err));
            }
        }
    }
    match failure {
        Some(err) => Err(err),
        None => Ok(sum),
    }
}

fn task_failed(index: usize, err: JoinError) -> PiError {
    let reason = if err.is_panic() {
        panic_reason(err.into_panic().as_ref())
    } else {
        err.to_string()
    };
    PiError::WorkerFailed { index, reason }
}

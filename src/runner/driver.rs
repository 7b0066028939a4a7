use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::http::RequestExecutor;
use crate::report::{self, AggregateReport};
use crate::shutdown::ShutdownSender;

use super::LoadPlan;

/// Upper bound on the preallocated results vector; larger runs grow on demand.
const MAX_PREALLOCATED_RESULTS: usize = 1 << 20;

/// Runs the plan to completion and reduces the samples into a report.
///
/// Admission is bounded by a semaphore holding one permit per worker
/// slot, so at most `plan.workers` requests are ever in flight. A
/// shutdown signal stops admission; requests already in flight drain
/// normally and still land in the report, with the never-admitted
/// remainder reported as cancelled.
///
/// # Errors
///
/// Returns an error when a spawned request task panics or is aborted.
pub async fn run_load_test(
    plan: &LoadPlan,
    executor: &Arc<dyn RequestExecutor>,
    shutdown_tx: &ShutdownSender,
) -> AppResult<AggregateReport> {
    let request_count = plan.request_count.get();
    let workers = plan.workers.get();
    let mut shutdown_rx = shutdown_tx.subscribe();

    info!(
        "Starting load test: {} requests to {} across {} worker slots.",
        request_count, plan.url, workers
    );

    let permits = Arc::new(Semaphore::new(workers));
    let capacity = usize::try_from(request_count)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATED_RESULTS);
    let mut handles = Vec::with_capacity(capacity);

    let run_start = Instant::now();
    let mut admitted: u64 = 0;
    while admitted < request_count {
        let admission = tokio::select! {
            _ = shutdown_rx.recv() => None,
            permit = Arc::clone(&permits).acquire_owned() => permit.ok(),
        };
        let Some(permit) = admission else {
            debug!("Shutdown received; admission stopped after {} requests.", admitted);
            break;
        };

        let task_executor = Arc::clone(executor);
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            task_executor.execute().await
        }));
        admitted = admitted.saturating_add(1);
    }

    let mut samples = Vec::with_capacity(handles.len());
    for handle in handles {
        samples.push(handle.await?);
    }
    let total_time = run_start.elapsed();

    let cancelled_requests = request_count.saturating_sub(admitted);
    let report = report::build_report(
        &samples,
        total_time,
        cancelled_requests,
        plan.variable_length,
    );
    info!(
        "Load test finished: {} completed, {} failed, {} cancelled.",
        samples.len(),
        report.failed_requests,
        cancelled_requests
    );
    Ok(report)
}

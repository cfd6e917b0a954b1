// SPDX-License-Identifier: MIT

use crate::scheduler::ReadyJob;
use crate::transport::AgentTransport;
use fc_core::clock::Clock;
use fc_storage::Store;
use fc_wire::JobNew;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

/// Runs the worker loop until `cancel` fires or the scheduler's sender is
/// dropped (§4.7, §5).
pub async fn run_worker(
    rx: &mut mpsc::Receiver<ReadyJob>,
    store: &dyn Store,
    transport: &dyn AgentTransport,
    clock: &dyn Clock,
    cancel: &CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            ready = rx.recv() => {
                match ready {
                    Some(ready) => dispatch_one(ready, store, transport, clock).await,
                    None => return,
                }
            }
        }
    }
}

/// Handles one job handed off by the scheduler (§4.7 worker loop body).
/// The per-job lock is released when `ready` drops at the end of this
/// function — after persistence, matching "Persist the job ... Release
/// j's lock."
async fn dispatch_one(
    mut ready: ReadyJob,
    store: &dyn Store,
    transport: &dyn AgentTransport,
    clock: &dyn Clock,
) {
    let now = clock.now();
    let job = &mut *ready.guard;

    let plugin = match store.plugins_find_by_id(job.plugin_id).await {
        Ok(plugin) => plugin,
        Err(e) => {
            job.record_start_failure(&e.to_string(), now);
            if let Err(persist_err) = store.jobs_update(job.clone()).await {
                error!(job_id = job.id.get(), error = %persist_err, "failed to persist job after plugin lookup failure");
            }
            return;
        }
    };

    let frame = JobNew {
        id: job.id.get(),
        name: plugin.job_frame_name(),
        config: job.config.clone(),
        target: job.bucket_name.clone(),
    };

    match transport.send_job_new(&job.agent_host, frame).await {
        Ok(()) => job.record_dispatched(now),
        Err(e) if e.is_unavailable() => {
            job.record_unavailable(now);
        }
        Err(e) => job.record_start_failure(&e.to_string(), now),
    }

    if let Err(e) = store.jobs_update(job.clone()).await {
        error!(job_id = job.id.get(), error = %e, "failed to persist job after dispatch");
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

use crate::job_slice::JobSlice;
use fc_core::clock::Clock;
use fc_core::job::Job;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::OwnedMutexGuard;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Scheduler tick period (§4.7: "a 5-second ticker").
pub const TICK_INTERVAL: Duration = Duration::from_secs(5);

/// A job the scheduler decided is ready, with its per-job lock already
/// held. The worker receives this, does its work, and drops it — that
/// drop is the only place the lock is released once a job is sent (§9's
/// "lock transfer": "no other code path acquires the Job lock").
pub struct ReadyJob {
    pub guard: OwnedMutexGuard<Job>,
}

/// Runs the scheduler loop until `cancel` fires (§4.7, §5). `tx` should
/// have a small fixed capacity (1 is enough): the scheduler only ever
/// holds one job's lock while offering it to the worker, so a
/// single-slot channel reproduces the spec's "unbuffered channel"
/// backpressure — a slow worker delays the *next* tick's scan, exactly
/// as §5 describes.
pub async fn run_scheduler(
    jobs: &JobSlice,
    clock: &dyn Clock,
    tx: &mpsc::Sender<ReadyJob>,
    cancel: &CancellationToken,
) {
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("scheduler stopping on cancellation");
                return;
            }
            _ = ticker.tick() => {
                if tick_once(jobs, clock, tx, cancel).await.is_err() {
                    debug!("scheduler stopping: worker channel closed");
                    return;
                }
            }
        }
    }
}

/// One scan over the job slice (§4.7 loop body). Returns `Err(())` if the
/// worker side of the channel has gone away, signalling the caller to
/// stop the scheduler loop entirely.
pub async fn tick_once(
    jobs: &JobSlice,
    clock: &dyn Clock,
    tx: &mpsc::Sender<ReadyJob>,
    cancel: &CancellationToken,
) -> Result<(), ()> {
    let now = clock.now();
    for cell in jobs.snapshot_cells() {
        let guard = cell.lock_owned().await;
        if !guard.is_ready(now) {
            continue; // guard drops here, releasing the lock immediately.
        }
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            send_result = tx.send(ReadyJob { guard }) => {
                if send_result.is_err() {
                    return Err(());
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

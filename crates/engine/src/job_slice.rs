// SPDX-License-Identifier: MIT

use fc_core::job::Job;
use parking_lot::Mutex as SyncMutex;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

/// A job guarded by its own lock. The scheduler and worker are the only
/// two callers that ever acquire it (§5): the scheduler takes it to
/// decide readiness, and — if it sends the job onward — hands the
/// already-held guard to the worker instead of releasing and
/// re-acquiring (§9's "lock transfer" design note).
pub type JobCell = Arc<AsyncMutex<Job>>;

/// The scheduler's in-memory job set (§4.7): loaded once at startup from
/// persistence, mutated only by `append` (new jobs from `AddJob`) and
/// read by `list`/`snapshot_cells`. The outer lock serializes list/append
/// only — it is never held across a per-job lock acquisition or I/O.
#[derive(Default)]
pub struct JobSlice {
    cells: SyncMutex<Vec<JobCell>>,
}

impl JobSlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_jobs(jobs: Vec<Job>) -> Self {
        Self {
            cells: SyncMutex::new(jobs.into_iter().map(|j| Arc::new(AsyncMutex::new(j))).collect()),
        }
    }

    /// Append a freshly created job to the in-memory slice (§4.8's final
    /// step).
    pub fn append(&self, job: Job) {
        self.cells.lock().push(Arc::new(AsyncMutex::new(job)));
    }

    /// A snapshot of the cell handles at this instant. Cloning `Arc`s is
    /// cheap and lets the scheduler iterate without holding the outer
    /// lock while it acquires per-job locks one at a time.
    pub fn snapshot_cells(&self) -> Vec<JobCell> {
        self.cells.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.cells.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A consistent read of every job's current state, for `JobList`
    /// (§6) and tests. Acquires each per-job lock in turn.
    pub async fn list(&self) -> Vec<Job> {
        let cells = self.snapshot_cells();
        let mut jobs = Vec::with_capacity(cells.len());
        for cell in cells {
            jobs.push(cell.lock().await.clone());
        }
        jobs
    }
}

#[cfg(test)]
#[path = "job_slice_tests.rs"]
mod tests;

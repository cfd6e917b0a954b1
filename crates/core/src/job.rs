// SPDX-License-Identifier: MIT

use crate::define_int_id;
use crate::plugin::PluginId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_int_id! {
    /// A `Job` row's store-assigned primary key.
    pub struct JobId;
}

/// Maximum `reconn_attempts` before a job transitions to `failed` (§4.7, §8).
pub const MAX_RECONN_ATTEMPTS: u32 = 10;

/// Bucket names for jobs and agents are prefixed this way (§3, §6).
pub const BUCKET_PREFIX: &str = "drlm-";

/// `unknown` is reserved and never stored by this system (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Unknown,
    Scheduled,
    Running,
    Finished,
    Failed,
    Cancelled,
}

crate::simple_display!(JobStatus {
    Unknown => "unknown",
    Scheduled => "scheduled",
    Running => "running",
    Finished => "finished",
    Failed => "failed",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub plugin_id: PluginId,
    pub agent_host: String,
    pub status: JobStatus,
    pub time: DateTime<Utc>,
    pub config: String,
    pub bucket_name: String,
    pub info: String,
    pub reconn_attempts: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// `plugin_id != 0` and `bucket_name` starts with `drlm-` (§8 invariant).
    pub fn upholds_storage_invariants(&self) -> bool {
        self.plugin_id.get() != 0 && self.bucket_name.starts_with(BUCKET_PREFIX)
    }

    /// Append-only log: new lines are joined with a leading `\n` (§4.5).
    pub fn append_info(&mut self, line: &str) {
        self.info.push('\n');
        self.info.push_str(line);
    }

    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        self.status == JobStatus::Scheduled && now >= self.time
    }

    /// Record a failed dispatch attempt. Returns `true` if the job was
    /// transitioned to `failed` (cap reached), `false` if it will be
    /// retried on the next tick.
    pub fn record_unavailable(&mut self, now: DateTime<Utc>) -> bool {
        self.reconn_attempts += 1;
        self.updated_at = now;
        if self.reconn_attempts >= MAX_RECONN_ATTEMPTS {
            self.status = JobStatus::Failed;
            true
        } else {
            false
        }
    }

    pub fn record_start_failure(&mut self, error: &str, now: DateTime<Utc>) {
        self.status = JobStatus::Failed;
        self.append_info(error);
        self.updated_at = now;
    }

    pub fn record_dispatched(&mut self, now: DateTime<Utc>) {
        self.status = JobStatus::Running;
        self.updated_at = now;
    }
}

/// Input to job insertion, produced by the `AddJob` contract (§4.8).
pub struct NewJob {
    pub plugin_id: PluginId,
    pub agent_host: String,
    pub status: JobStatus,
    pub time: DateTime<Utc>,
    pub config: String,
    pub bucket_name: String,
    pub info: String,
    pub reconn_attempts: u32,
}

crate::builder!(
    pub struct NewJobBuilder => NewJob {
        into {
            agent_host: String = "127.0.0.1",
            config: String = "{}",
            bucket_name: String = "drlm-placeholder",
            info: String = "",
        }
        set {
            plugin_id: PluginId = PluginId::from_raw(1),
            status: JobStatus = JobStatus::Scheduled,
            reconn_attempts: u32 = 0,
        }
        computed {
            time: DateTime<Utc> = chrono::Utc::now(),
        }
    }
);

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;

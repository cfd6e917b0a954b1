// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire projection of `fc_core::User` — no `password_hash`, which never
/// leaves the process once it's no longer a plaintext argument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub username: String,
    pub auth_type: String,
}

impl From<&fc_core::User> for UserSummary {
    fn from(user: &fc_core::User) -> Self {
        Self {
            username: user.username.clone(),
            auth_type: user.auth_type.to_string(),
        }
    }
}

/// Wire projection of `fc_core::Agent`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSummary {
    pub host: String,
    pub accepted: bool,
    pub arch: String,
    pub os: String,
    pub os_version: String,
    pub distro: String,
    pub distro_version: String,
    pub version: String,
}

impl From<&fc_core::Agent> for AgentSummary {
    fn from(agent: &fc_core::Agent) -> Self {
        Self {
            host: agent.host.clone(),
            accepted: agent.accepted,
            arch: agent.arch.clone(),
            os: agent.os.clone(),
            os_version: agent.os_version.clone(),
            distro: agent.distro.clone(),
            distro_version: agent.distro_version.clone(),
            version: agent.version.clone(),
        }
    }
}

/// Wire projection of `fc_core::Job`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobSummary {
    pub id: i64,
    pub agent_host: String,
    pub status: String,
    pub time: DateTime<Utc>,
    pub bucket_name: String,
    pub info: String,
    pub reconn_attempts: u32,
}

impl From<&fc_core::Job> for JobSummary {
    fn from(job: &fc_core::Job) -> Self {
        Self {
            id: job.id.get(),
            agent_host: job.agent_host.clone(),
            status: job.status.to_string(),
            time: job.time,
            bucket_name: job.bucket_name.clone(),
            info: job.info.clone(),
            reconn_attempts: job.reconn_attempts,
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;

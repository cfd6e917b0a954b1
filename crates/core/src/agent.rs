// SPDX-License-Identifier: MIT

use crate::define_int_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_int_id! {
    /// An `Agent` row's store-assigned primary key.
    pub struct AgentId;
}

/// Host key entries are preserved in arrival order and joined with `|||`
/// on the stored row, per §4.6.
pub const HOST_KEY_SEPARATOR: &str = "|||";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub host: String,
    pub accepted: bool,
    pub secret: String,
    pub object_key: String,
    pub ssh_port: u16,
    pub ssh_user: String,
    pub ssh_host_keys: Vec<String>,
    pub arch: String,
    pub os: String,
    pub os_version: String,
    pub distro: String,
    pub distro_version: String,
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Agent {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// A row with `accepted=false` is a join request, per the GLOSSARY.
    pub fn is_join_request(&self) -> bool {
        !self.accepted
    }

    pub fn join_host_keys(&self) -> String {
        self.ssh_host_keys.join(HOST_KEY_SEPARATOR)
    }

    pub fn split_host_keys(joined: &str) -> Vec<String> {
        if joined.is_empty() {
            return Vec::new();
        }
        joined.split(HOST_KEY_SEPARATOR).map(str::to_owned).collect()
    }

    /// Object-store user name for an operator-added agent: `drlm-agent-<id>`.
    pub fn object_store_user(id: AgentId) -> String {
        format!("drlm-agent-{id}")
    }

    /// Binary bucket name for an operator-added agent: `drlm-agent-<id>-bin`.
    pub fn binary_bucket_name(id: AgentId) -> String {
        format!("drlm-agent-{id}-bin")
    }
}

/// Input to agent insertion. `secret`/`object_key` may be empty; the
/// store's pre-create hook fills `secret` in if so (§4.2).
pub struct NewAgent {
    pub host: String,
    pub accepted: bool,
    pub secret: String,
    pub object_key: String,
    pub ssh_port: u16,
    pub ssh_user: String,
    pub ssh_host_keys: Vec<String>,
    pub arch: String,
    pub os: String,
    pub os_version: String,
    pub distro: String,
    pub distro_version: String,
    pub version: String,
}

crate::builder!(
    pub struct NewAgentBuilder => NewAgent {
        into {
            host: String = "127.0.0.1",
            secret: String = "",
            object_key: String = "",
            ssh_user: String = "drlm",
            arch: String = "amd64",
            os: String = "linux",
            os_version: String = "",
            distro: String = "debian",
            distro_version: String = "",
            version: String = "",
        }
        set {
            accepted: bool = false,
            ssh_port: u16 = 22,
            ssh_host_keys: Vec<String> = Vec::new(),
        }
    }
);

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;

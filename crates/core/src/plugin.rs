// SPDX-License-Identifier: MIT

use crate::define_int_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_int_id! {
    /// A `Plugin` row's store-assigned primary key.
    pub struct PluginId;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugin {
    pub id: PluginId,
    pub repo: String,
    pub name: String,
    pub version: String,
    pub agent_host: String,
    pub arch: Vec<String>,
    pub os: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Plugin {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Identity is `repo/name`; version distinguishes revisions (§3).
    pub fn identity(&self) -> String {
        format!("{}/{}", self.repo, self.name)
    }

    pub fn matches_identity(&self, identity: &str) -> bool {
        self.identity() == identity
    }

    /// `drlm-plugin-<repo>-<name>-<version>`, the job-start frame name
    /// (§4.6, §4.7).
    pub fn job_frame_name(&self) -> String {
        format!(
            "drlm-plugin-{}-{}-{}",
            self.repo, self.name, self.version
        )
    }
}

/// Input to plugin insertion.
pub struct NewPlugin {
    pub repo: String,
    pub name: String,
    pub version: String,
    pub agent_host: String,
    pub arch: Vec<String>,
    pub os: Vec<String>,
}

crate::builder!(
    pub struct NewPluginBuilder => NewPlugin {
        into {
            repo: String = "default",
            name: String = "tar",
            version: String = "v1.0.0",
            agent_host: String = "127.0.0.1",
        }
        set {
            arch: Vec<String> = Vec::new(),
            os: Vec<String> = Vec::new(),
        }
    }
);

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;

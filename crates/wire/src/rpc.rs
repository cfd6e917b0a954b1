// SPDX-License-Identifier: MIT

use crate::status::Status;
use crate::types::{AgentSummary, JobSummary, UserSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The RPC facade's request surface (§4.9, §6). Every variant except
/// `UserLogin` and `UserTokenRenew` requires a bearer token, carried
/// alongside the request by the transport (metadata key `tkn`, per §6)
/// rather than as a field here — the unary interceptor reads it before
/// this enum is even decoded.
///
/// Binary-carrying calls are modeled as a `*Chunk` sequence terminated by
/// a matching `*End`: the side effect happens once, on `End`, after every
/// chunk has been accumulated (§4.9).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    UserLogin {
        username: String,
        password: String,
    },
    UserTokenRenew,
    UserAdd {
        username: String,
        password: String,
    },
    UserDelete {
        username: String,
    },
    UserList,

    AgentAdd {
        host: String,
    },
    AgentAccept {
        host: String,
    },
    AgentDelete {
        host: String,
    },
    AgentGet {
        host: String,
    },
    AgentList,
    AgentRequestList,

    AgentInstallChunk {
        host: String,
        ssh_port: u16,
        ssh_user: String,
        ssh_password: String,
        bin_chunk: Vec<u8>,
    },
    AgentInstallEnd,

    AgentPluginAddChunk {
        host: String,
        repo: String,
        plugin: String,
        version: String,
        arch: Vec<String>,
        os: Vec<String>,
        bin_chunk: Vec<u8>,
    },
    AgentPluginAddEnd,

    JobSchedule {
        agent_host: String,
        name: String,
        config: String,
        #[serde(default)]
        time: Option<DateTime<Utc>>,
    },
    /// Unimplemented per spec.md §6 — the facade accepts the shape so a
    /// client can be written against it, and returns `Status::Unknown`
    /// with an explanatory message until it is.
    JobCancel {
        id: i64,
    },
    JobList {
        #[serde(default)]
        agent_host: Option<String>,
    },
}

/// The RPC facade's response surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    Token {
        token: String,
        expires_at: DateTime<Utc>,
    },
    Ok,
    User {
        user: UserSummary,
    },
    Users {
        users: Vec<UserSummary>,
    },
    Agent {
        agent: AgentSummary,
    },
    Agents {
        agents: Vec<AgentSummary>,
    },
    Job {
        job: JobSummary,
    },
    Jobs {
        jobs: Vec<JobSummary>,
    },
    Error {
        status: Status,
        message: String,
    },
}

impl Response {
    pub fn from_error(err: &fc_core::Error) -> Self {
        Self::Error {
            status: Status::from(err),
            message: err.to_string(),
        }
    }
}

/// One RPC call over the client↔daemon control connection: the bearer
/// token (metadata key `tkn`, §6), absent for `UserLogin`, and the
/// request itself. The unary interceptor (§4.9) reads `token` before
/// `request` is dispatched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub token: Option<String>,
    pub request: Request,
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;

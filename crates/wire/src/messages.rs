// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// The closed tagged union carried on the agent session stream (§4.5,
/// §9 — "a closed tagged union with three variants ... dispatch by
/// match, not by runtime reflection"). Every frame except the initial
/// `JoinRequest` also carries a bearer token in stream metadata (§6);
/// that token lives alongside the frame in [`crate::rpc`]'s transport
/// envelope, not inside this enum, since `ValidateAgent` needs the
/// secret before it knows which variant it's looking at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum AgentMessage {
    /// Unsolicited: a host asking to be enrolled. The session determines
    /// host from the peer address for this variant only (§4.5 step 1).
    JoinRequest {
        arch: String,
        os: String,
        os_version: String,
        distro: String,
        distro_version: String,
        version: String,
    },

    /// Sent once the agent has received its `JoinResponse` and is ready
    /// to receive job frames; moves the stream into the accepted pool.
    ConnectionEstablish,

    /// Reports a job's terminal or intermediate state back to the
    /// controller. `info` is appended to the job's log, not replaced
    /// (§4.5 step 2).
    JobUpdate {
        job_id: i64,
        status: JobUpdateStatus,
        info: String,
    },
}

/// The subset of `fc_core::JobStatus` an agent is allowed to report —
/// `scheduled` is a controller-only state no agent frame ever names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobUpdateStatus {
    Running,
    Finished,
    Failed,
    Cancelled,
}

impl From<JobUpdateStatus> for fc_core::JobStatus {
    fn from(status: JobUpdateStatus) -> Self {
        match status {
            JobUpdateStatus::Running => fc_core::JobStatus::Running,
            JobUpdateStatus::Finished => fc_core::JobStatus::Finished,
            JobUpdateStatus::Failed => fc_core::JobStatus::Failed,
            JobUpdateStatus::Cancelled => fc_core::JobStatus::Cancelled,
        }
    }
}

/// Whether `AgentAccept` accepted or rejected the join request it's
/// replying to. Only `Accept` is driven by this workspace today (§4.5
/// names no rejection path), but the wire type stays honest about the
/// shape a future reject flow would need rather than baking in
/// "always accept".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome")]
pub enum JoinOutcome {
    Accept {
        secret: String,
        object_access: String,
        object_secret: String,
    },
    Reject {
        reason: String,
    },
}

/// Server → agent reply to a completed `AgentAccept` (§4.5). Sent on the
/// pending stream *before* it is moved into the accepted pool — see
/// spec.md §9's "Open question — double-delivery on accept".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinResponse {
    #[serde(flatten)]
    pub outcome: JoinOutcome,
}

impl JoinResponse {
    pub fn accept(secret: String, object_access: String, object_secret: String) -> Self {
        Self {
            outcome: JoinOutcome::Accept {
                secret,
                object_access,
                object_secret,
            },
        }
    }
}

/// Server → agent job-start frame (§4.7 Worker loop): `name` is always
/// `drlm-plugin-<repo>-<name>-<version>`, `target` is the job's bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobNew {
    pub id: i64,
    pub name: String,
    pub config: String,
    pub target: String,
}

/// A single frame on the agent session stream: the bearer token
/// `ValidateAgent` checks (absent on `JoinRequest`, which is
/// authenticated by peer address instead, §4.5 step 1) alongside the
/// message itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentFrame {
    #[serde(default)]
    pub token: Option<String>,
    pub message: AgentMessage,
}

/// Server → agent frames, wrapping the two reply shapes the session
/// writes back (§4.5, §4.7).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ServerFrame {
    JoinResponse(JoinResponse),
    JobNew(JobNew),
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;

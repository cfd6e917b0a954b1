// SPDX-License-Identifier: MIT

//! Wire formats carried over the two long-lived connections this
//! workspace speaks: the agent session stream (§4.5/§9 — a closed
//! three-variant tagged union plus the server's two reply frames) and the
//! RPC facade's unary/streaming calls (§4.9/§6). Both ride the same
//! length-prefixed JSON framing in [`framing`].

mod error;
pub mod framing;
mod messages;
mod rpc;
mod status;
mod types;

pub use error::WireError;
pub use messages::{
    AgentFrame, AgentMessage, JobNew, JobUpdateStatus, JoinOutcome, JoinResponse, ServerFrame,
};
pub use rpc::{Request, RequestEnvelope, Response};
pub use status::Status;
pub use types::{AgentSummary, JobSummary, UserSummary};

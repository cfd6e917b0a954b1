// SPDX-License-Identifier: MIT

use parking_lot::Mutex;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// The two reply shapes a session task ever needs to write to its agent's
/// real transport (§4.5, §4.7), sent through an [`AgentHandle`] by
/// whichever caller doesn't own the stream directly — `AgentAccept`
/// (driven by an RPC handler) and the Worker (via
/// [`crate::rpc::DaemonTransport`]).
#[derive(Debug, Clone)]
pub enum OutboundFrame {
    JoinResponse(fc_wire::JoinResponse),
    JobNew(fc_wire::JobNew),
}

/// A session task's mailbox: the owning task drains this channel and
/// writes each frame to the real stream it holds. Connection pools store
/// this handle, not the stream itself, so a pool lookup never needs to
/// touch the socket (§4.4, §5: "callers never hold the mutex across
/// I/O").
pub type AgentHandle = mpsc::UnboundedSender<OutboundFrame>;

/// One of the two thread-safe maps named in §4.4: `host → stream`
/// (represented here by an [`AgentHandle`]), mutated only under its own
/// exclusive lock, with `Get`/`Add`/`Delete` as the only operations. A
/// host lives in exactly one of the accepted/pending pools at a time —
/// the [`crate::session`] dispatch loop is responsible for that
/// transition, not this type.
#[derive(Default)]
pub struct ConnPool {
    handles: Mutex<HashMap<String, AgentHandle>>,
}

impl ConnPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, host: &str) -> Option<AgentHandle> {
        self.handles.lock().get(host).cloned()
    }

    pub fn add(&self, host: impl Into<String>, handle: AgentHandle) {
        self.handles.lock().insert(host.into(), handle);
    }

    /// Removes and returns the handle for `host`, if present — used both
    /// by end-of-stream cleanup and by the pending→accepted transition
    /// `AgentAccept` performs.
    pub fn delete(&self, host: &str) -> Option<AgentHandle> {
        self.handles.lock().remove(host)
    }

    pub fn contains(&self, host: &str) -> bool {
        self.handles.lock().contains_key(host)
    }

    pub fn len(&self) -> usize {
        self.handles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;

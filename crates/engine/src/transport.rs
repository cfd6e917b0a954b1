// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use fc_core::error::Result;
use fc_wire::JobNew;

/// The worker's only window onto the agent session fabric (§4.7): look
/// up `host` in the accepted connection pool and send it a `JobNew`
/// frame. `fc-daemon` implements this over its two connection pools so
/// `fc-engine` never has to depend on, or even know about, how those
/// pools are represented.
///
/// Implementations return `Err` with [`fc_core::Error::is_unavailable`]
/// true exactly when the host isn't in the accepted pool or the
/// transport itself reports unavailable (§4.7) — any other error is a
/// general start failure.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    async fn send_job_new(&self, host: &str, frame: JobNew) -> Result<()>;
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

//! The RPC facade, agent session fabric, and connection pools (§4.4,
//! §4.5, §4.6, §4.9) bound together by a process-wide [`Context`]
//! (§4.1). `fleetd`'s `main` is a thin accept-loop wrapper around the
//! types this crate exports; everything that decides what a connection
//! *means* lives here so it can be driven directly from tests.

pub mod agent_lifecycle;
pub mod config;
pub mod context;
pub mod controller_key;
pub mod pool;
pub mod rpc;
pub mod session;

#[cfg(test)]
pub mod test_support;

pub use config::DaemonConfig;
pub use context::{Context, Shutdown};
pub use pool::ConnPool;

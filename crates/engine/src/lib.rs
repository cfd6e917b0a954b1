// SPDX-License-Identifier: MIT

//! The scheduler and worker (§4.7, §4.9) plus the `AddJob` contract
//! (§4.8) that feeds them. Nothing here owns a network listener or a
//! connection pool — those are `fc-daemon`'s job; this crate only needs
//! a [`Store`](fc_storage::Store) and an [`AgentTransport`] to reach the
//! agent a ready job targets.

mod add_job;
mod job_slice;
mod scheduler;
mod transport;
mod worker;

pub use add_job::{add_job, AddJobInput};
pub use job_slice::{JobCell, JobSlice};
pub use scheduler::{run_scheduler, ReadyJob, TICK_INTERVAL};
pub use transport::AgentTransport;
pub use worker::run_worker;

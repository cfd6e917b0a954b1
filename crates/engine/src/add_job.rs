// SPDX-License-Identifier: MIT

use crate::job_slice::JobSlice;
use chrono::{DateTime, Utc};
use fc_core::agent::Agent;
use fc_core::clock::Clock;
use fc_core::error::Result;
use fc_core::job::{Job, JobStatus, NewJob};
use fc_objectstore::{ObjectStore, ObjectStoreAdmin, ObjectStoreGateway};
use fc_storage::Store;

/// Inputs to the `AddJob` contract (§4.8): `(agent_host, plugin_identity
/// = "repo/name", config, time)`. `time` defaults to "now" when absent.
pub struct AddJobInput {
    pub agent_host: String,
    pub plugin_identity: String,
    pub config: String,
    pub time: Option<DateTime<Utc>>,
}

/// Implements §4.8: resolve the agent and the plugin matching the
/// requested `repo/name` identity, allocate a fresh per-job bucket owned
/// by the agent's object-store user, insert the job in `scheduled`, and
/// append it to the scheduler's in-memory slice.
pub async fn add_job<S, A>(
    store: &dyn Store,
    gateway: &ObjectStoreGateway<S, A>,
    jobs: &JobSlice,
    clock: &dyn Clock,
    input: AddJobInput,
) -> Result<Job>
where
    S: ObjectStore,
    A: ObjectStoreAdmin,
{
    let agent = store.agents_find_by_host(&input.agent_host).await?;
    let plugin = store
        .plugins_find_by_identity(&input.agent_host, &input.plugin_identity)
        .await?;

    let object_user = Agent::object_store_user(agent.id);
    let bucket_name = gateway.make_bucket_for_user(&object_user, None).await?;

    let new = NewJob {
        plugin_id: plugin.id,
        agent_host: input.agent_host,
        status: JobStatus::Scheduled,
        time: input.time.unwrap_or_else(|| clock.now()),
        config: input.config,
        bucket_name,
        info: String::new(),
        reconn_attempts: 0,
    };
    let job = store.jobs_insert(new).await?;
    jobs.append(job.clone());
    Ok(job)
}

#[cfg(test)]
#[path = "add_job_tests.rs"]
mod tests;

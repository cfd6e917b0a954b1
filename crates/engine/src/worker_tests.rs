// SPDX-License-Identifier: MIT

use super::*;
use crate::job_slice::JobCell;
use async_trait::async_trait;
use fc_core::clock::SystemClock;
use fc_core::error::{Error, Result};
use fc_core::job::{JobStatus, NewJob, MAX_RECONN_ATTEMPTS};
use fc_core::plugin::{NewPlugin, NewPluginBuilder};
use fc_storage::MemoryStore;
use fc_storage::Store;
use parking_lot::Mutex;
use std::sync::Arc;

struct FakeTransport {
    sent: Mutex<Vec<(String, JobNew)>>,
    result: Mutex<Option<Error>>,
}

impl FakeTransport {
    fn ok() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            result: Mutex::new(None),
        }
    }

    fn failing(err: Error) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            result: Mutex::new(Some(err)),
        }
    }
}

#[async_trait]
impl AgentTransport for FakeTransport {
    async fn send_job_new(&self, host: &str, frame: JobNew) -> Result<()> {
        if let Some(err) = self.result.lock().as_ref() {
            return Err(match err {
                Error::Unavailable(m) => Error::unavailable(m.clone()),
                Error::Unknown(m) => Error::unknown(m.clone()),
                other => Error::unknown(other.to_string()),
            });
        }
        self.sent.lock().push((host.to_string(), frame));
        Ok(())
    }
}

async fn seed_plugin(store: &MemoryStore) -> fc_core::plugin::Plugin {
    let new: NewPlugin = NewPluginBuilder::default()
        .repo("default")
        .name("tar")
        .agent_host("127.0.0.1")
        .build();
    store.plugins_insert(new).await.expect("inserts plugin")
}

async fn seed_job(store: &MemoryStore, plugin_id: fc_core::PluginId, reconn_attempts: u32) -> fc_core::job::Job {
    let new: NewJob = NewJob::builder()
        .plugin_id(plugin_id)
        .agent_host("127.0.0.1")
        .bucket_name("drlm-agent-1-name")
        .reconn_attempts(reconn_attempts)
        .build();
    store.jobs_insert(new).await.expect("inserts job")
}

#[tokio::test]
async fn successful_dispatch_transitions_to_running_and_persists() {
    let store = MemoryStore::new();
    let plugin = seed_plugin(&store).await;
    let job = seed_job(&store, plugin.id, 0).await;
    let cell: JobCell = Arc::new(tokio::sync::Mutex::new(job.clone()));
    let guard = cell.lock_owned().await;

    let transport = FakeTransport::ok();
    let clock = SystemClock;
    dispatch_one(ReadyJob { guard }, &store, &transport, &clock).await;

    let persisted = store.jobs_find_by_id(job.id).await.expect("persisted");
    assert_eq!(persisted.status, JobStatus::Running);
    assert_eq!(transport.sent.lock().len(), 1);
    assert_eq!(transport.sent.lock()[0].0, "127.0.0.1");
    assert_eq!(transport.sent.lock()[0].1.name, "drlm-plugin-default-tar-v1.0.0");
}

#[tokio::test]
async fn unavailable_agent_increments_reconn_attempts_and_stays_scheduled() {
    let store = MemoryStore::new();
    let plugin = seed_plugin(&store).await;
    let job = seed_job(&store, plugin.id, 3).await;
    let cell: JobCell = Arc::new(tokio::sync::Mutex::new(job.clone()));
    let guard = cell.lock_owned().await;

    let transport = FakeTransport::failing(Error::unavailable("not connected"));
    let clock = SystemClock;
    dispatch_one(ReadyJob { guard }, &store, &transport, &clock).await;

    let persisted = store.jobs_find_by_id(job.id).await.expect("persisted");
    assert_eq!(persisted.status, JobStatus::Scheduled);
    assert_eq!(persisted.reconn_attempts, 4);
}

#[tokio::test]
async fn unavailable_agent_past_the_cap_fails_the_job() {
    let store = MemoryStore::new();
    let plugin = seed_plugin(&store).await;
    let job = seed_job(&store, plugin.id, MAX_RECONN_ATTEMPTS).await;
    let cell: JobCell = Arc::new(tokio::sync::Mutex::new(job.clone()));
    let guard = cell.lock_owned().await;

    let transport = FakeTransport::failing(Error::unavailable("not connected"));
    let clock = SystemClock;
    dispatch_one(ReadyJob { guard }, &store, &transport, &clock).await;

    let persisted = store.jobs_find_by_id(job.id).await.expect("persisted");
    assert_eq!(persisted.status, JobStatus::Failed);
}

#[tokio::test]
async fn a_non_unavailable_transport_error_fails_the_job_immediately() {
    let store = MemoryStore::new();
    let plugin = seed_plugin(&store).await;
    let job = seed_job(&store, plugin.id, 0).await;
    let cell: JobCell = Arc::new(tokio::sync::Mutex::new(job.clone()));
    let guard = cell.lock_owned().await;

    let transport = FakeTransport::failing(Error::unknown("transport exploded"));
    let clock = SystemClock;
    dispatch_one(ReadyJob { guard }, &store, &transport, &clock).await;

    let persisted = store.jobs_find_by_id(job.id).await.expect("persisted");
    assert_eq!(persisted.status, JobStatus::Failed);
    assert!(persisted.info.contains("transport exploded"));
}

#[tokio::test]
async fn a_missing_plugin_fails_the_job_without_calling_the_transport() {
    let store = MemoryStore::new();
    // plugin_id 9999 was never inserted.
    let new: NewJob = NewJob::builder()
        .plugin_id(fc_core::PluginId::from_raw(9999))
        .agent_host("127.0.0.1")
        .build();
    let job = store.jobs_insert(new).await.expect("inserts job");
    let cell: JobCell = Arc::new(tokio::sync::Mutex::new(job.clone()));
    let guard = cell.lock_owned().await;

    let transport = FakeTransport::ok();
    let clock = SystemClock;
    dispatch_one(ReadyJob { guard }, &store, &transport, &clock).await;

    assert!(transport.sent.lock().is_empty());
    let persisted = store.jobs_find_by_id(job.id).await.expect("persisted");
    assert_eq!(persisted.status, JobStatus::Failed);
}

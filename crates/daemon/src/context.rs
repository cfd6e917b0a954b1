// SPDX-License-Identifier: MIT

use crate::config::DaemonConfig;
use crate::controller_key;
use crate::pool::ConnPool;
use chrono::Duration;
use fc_auth::TokenService;
use fc_core::clock::{Clock, SystemClock};
use fc_core::error::Result;
use fc_engine::JobSlice;
use fc_objectstore::{MinioAdmin, ObjectStoreGateway, S3ObjectStore};
use fc_storage::Store;
use russh_keys::key::KeyPair;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The concrete object-store gateway this workspace ships: `S3ObjectStore`
/// over `aws-sdk-s3` for buckets/objects, `MinioAdmin` over `reqwest` for
/// user/policy administration (§4.3).
pub type Gateway = ObjectStoreGateway<S3ObjectStore, MinioAdmin>;

/// Everything a request handler, the scheduler/worker pair, or an agent
/// session needs, built once at startup and shared behind an `Arc`
/// (§5). Mirrors the teacher's `ListenCtx` shape: one struct bundling
/// persistence, collaborators, and shared mutable state, handed to every
/// task as `Arc<Context>`.
pub struct Context {
    pub config: DaemonConfig,
    pub store: Arc<dyn Store>,
    pub gateway: Gateway,
    pub tokens: TokenService,
    pub clock: Arc<dyn Clock>,
    pub pending: ConnPool,
    pub accepted: ConnPool,
    pub jobs: JobSlice,
    pub cancel: CancellationToken,
    pub controller_key: KeyPair,
    pub controller_public_key_line: String,
}

impl Context {
    pub async fn build(config: DaemonConfig, store: Arc<dyn Store>) -> Result<Arc<Self>> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let tokens = TokenService::new(
            config.security.tokens_secret.as_bytes(),
            Duration::seconds(config.security.tokens_lifespan_secs),
            Duration::seconds(config.security.login_lifespan_secs),
            clock.clone(),
        )?;

        let aws_cfg = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .endpoint_url(config.minio.base_url())
            .region(aws_config::Region::new(config.minio.location.clone()))
            .credentials_provider(aws_sdk_s3::config::Credentials::new(
                &config.minio.access_key,
                &config.minio.secret_key,
                None,
                None,
                "fleetd-config",
            ))
            .load()
            .await;
        let s3_client = aws_sdk_s3::Client::new(&aws_cfg);
        let admin = MinioAdmin::new(
            reqwest::Client::new(),
            config.minio.base_url(),
            &config.minio.access_key,
            &config.minio.secret_key,
        );
        let gateway = ObjectStoreGateway::new(S3ObjectStore::new(s3_client), admin);

        let controller_key = controller_key::load_or_generate(&config.security.ssh_keys_path)?;
        let controller_public_key_line = controller_key::public_key_line(&controller_key);

        let jobs = JobSlice::from_jobs(store.jobs_list_all().await?);

        Ok(Arc::new(Self {
            config,
            store,
            gateway,
            tokens,
            clock,
            pending: ConnPool::new(),
            accepted: ConnPool::new(),
            jobs,
            cancel: CancellationToken::new(),
            controller_key,
            controller_public_key_line,
        }))
    }
}

/// The shutdown rendezvous §5 calls the "shutdown barrier": every long
/// running task (`main` spawns one per listener, plus the scheduler and
/// worker) registers its `JoinHandle` here; after cancelling `Context`'s
/// token, `main` awaits [`Shutdown::wait`] before closing the store
/// handle, matching §5's teardown order ("stop accepting new RPCs,
/// cancel the root context, await the shutdown barrier, then close the
/// store handle").
#[derive(Default)]
pub struct Shutdown {
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.handles.push(tokio::spawn(task));
    }

    /// Awaits every registered task. A task that panicked is logged and
    /// skipped rather than propagated — shutdown must complete either
    /// way.
    pub async fn wait(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "a shutdown task panicked");
            }
        }
    }
}

// SPDX-License-Identifier: MIT

//! Shared test-only `Context` construction. Bypasses `Context::build`,
//! which performs real AWS config loading and SSH key file I/O, so every
//! test in this crate can build one cheaply and deterministically.

use crate::config::{DaemonConfig, DbConfig, GrpcConfig, MinioConfig, SecurityConfig};
use crate::context::Context;
use fc_auth::TokenService;
use fc_core::clock::SystemClock;
use fc_engine::JobSlice;
use fc_objectstore::{MinioAdmin, ObjectStoreGateway, S3ObjectStore};
use fc_storage::{MemoryStore, Store};
use russh_keys::key::KeyPair;
use std::path::PathBuf;
use std::sync::Arc;

pub fn test_context(store: MemoryStore) -> Arc<Context> {
    test_context_dyn(Arc::new(store))
}

pub fn test_context_dyn(store: Arc<dyn Store>) -> Arc<Context> {
    let config = DaemonConfig {
        grpc: GrpcConfig {
            port: 0,
            tls: false,
            cert_path: None,
            key_path: None,
            agent_port: None,
        },
        security: SecurityConfig {
            bcrypt_cost: 4,
            tokens_secret: "x".repeat(32),
            tokens_lifespan_secs: 3600,
            login_lifespan_secs: 86_400,
            ssh_keys_path: PathBuf::from("/dev/null"),
        },
        db: DbConfig {
            host: "localhost".into(),
            port: 5432,
            username: "u".into(),
            password: "p".into(),
            database: "fleetd".into(),
        },
        minio: MinioConfig {
            host: "localhost".into(),
            port: 9000,
            ssl: false,
            cert_path: None,
            access_key: "access".into(),
            secret_key: "secret".into(),
            location: "us-east-1".into(),
        },
        log: None,
    };

    let clock = Arc::new(SystemClock);
    let tokens = TokenService::new(
        config.security.tokens_secret.as_bytes(),
        chrono::Duration::seconds(config.security.tokens_lifespan_secs),
        chrono::Duration::seconds(config.security.login_lifespan_secs),
        clock.clone(),
    )
    .expect("valid secret length");

    let s3_config = aws_sdk_s3::Config::builder()
        .behavior_version(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            "access", "secret", None, None, "test",
        ))
        .build();
    let gateway = ObjectStoreGateway::new(
        S3ObjectStore::new(aws_sdk_s3::Client::from_conf(s3_config)),
        MinioAdmin::new(reqwest::Client::new(), "http://localhost:9000", "access", "secret"),
    );

    let controller_key = KeyPair::generate_ed25519().expect("generates a key pair");
    let controller_public_key_line = crate::controller_key::public_key_line(&controller_key);

    Arc::new(Context {
        config,
        store,
        gateway,
        tokens,
        clock,
        pending: crate::pool::ConnPool::new(),
        accepted: crate::pool::ConnPool::new(),
        jobs: JobSlice::new(),
        cancel: tokio_util::sync::CancellationToken::new(),
        controller_key,
        controller_public_key_line,
    })
}

// SPDX-License-Identifier: MIT

use super::*;
use crate::test_support::test_context;
use fc_core::agent::NewAgentBuilder;
use fc_core::job::NewJobBuilder;
use fc_storage::MemoryStore;
use fc_storage::Store;

#[tokio::test]
async fn join_request_inserts_a_pending_agent_and_registers_the_handle() {
    let ctx = test_context(MemoryStore::new());
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut host = None;

    let frame = AgentFrame {
        token: None,
        message: AgentMessage::JoinRequest {
            arch: "amd64".into(),
            os: "linux".into(),
            os_version: "12".into(),
            distro: "debian".into(),
            distro_version: "12".into(),
            version: "1.0.0".into(),
        },
    };

    dispatch(frame, "10.0.0.5", &mut host, &ctx, &tx).await.expect("dispatches");

    assert_eq!(host.as_deref(), Some("10.0.0.5"));
    assert!(ctx.pending.contains("10.0.0.5"));
    assert!(!ctx.accepted.contains("10.0.0.5"));

    let agent = ctx.store.agents_find_by_host("10.0.0.5").await.expect("agent inserted");
    assert!(!agent.accepted);
    assert_eq!(agent.arch, "amd64");
}

#[tokio::test]
async fn connection_establish_requires_a_valid_token() {
    let ctx = test_context(MemoryStore::new());
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut host = None;

    let frame = AgentFrame {
        token: Some("bogus".into()),
        message: AgentMessage::ConnectionEstablish,
    };

    let err = dispatch(frame, "10.0.0.5", &mut host, &ctx, &tx).await.unwrap_err();
    assert_eq!(err.kind(), fc_core::error::ErrorKind::InvalidArgument);
    assert!(ctx.accepted.is_empty());
}

#[tokio::test]
async fn connection_establish_with_a_valid_secret_moves_the_stream_to_accepted() {
    let store = MemoryStore::new();
    let agent = store
        .agents_insert(
            NewAgentBuilder::default()
                .host("10.0.0.5")
                .accepted(true)
                .secret("s3cr3t")
                .build(),
        )
        .await
        .expect("inserts agent");
    let ctx = test_context(store);
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut host = None;

    let frame = AgentFrame {
        token: Some(agent.secret.clone()),
        message: AgentMessage::ConnectionEstablish,
    };

    dispatch(frame, "10.0.0.5", &mut host, &ctx, &tx).await.expect("dispatches");

    assert_eq!(host.as_deref(), Some("10.0.0.5"));
    assert!(ctx.accepted.contains("10.0.0.5"));
}

#[tokio::test]
async fn job_update_appends_info_and_persists_the_new_status() {
    let store = MemoryStore::new();
    let agent = store
        .agents_insert(
            NewAgentBuilder::default()
                .host("10.0.0.5")
                .accepted(true)
                .secret("s3cr3t")
                .build(),
        )
        .await
        .expect("inserts agent");
    let job = store
        .jobs_insert(
            NewJobBuilder::default()
                .agent_host("10.0.0.5")
                .info("starting")
                .build(),
        )
        .await
        .expect("inserts job");
    let ctx = test_context(store);
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut host = None;

    let frame = AgentFrame {
        token: Some(agent.secret.clone()),
        message: AgentMessage::JobUpdate {
            job_id: job.id.get(),
            status: fc_wire::JobUpdateStatus::Finished,
            info: "done".into(),
        },
    };

    dispatch(frame, "10.0.0.5", &mut host, &ctx, &tx).await.expect("dispatches");

    let updated = ctx.store.jobs_find_by_id(job.id).await.expect("job exists");
    assert_eq!(updated.status, fc_core::job::JobStatus::Finished);
    assert_eq!(updated.info, "starting\ndone");
}

#[tokio::test]
async fn an_unknown_job_id_surfaces_not_found() {
    let store = MemoryStore::new();
    let agent = store
        .agents_insert(
            NewAgentBuilder::default()
                .host("10.0.0.5")
                .accepted(true)
                .secret("s3cr3t")
                .build(),
        )
        .await
        .expect("inserts agent");
    let ctx = test_context(store);
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut host = None;

    let frame = AgentFrame {
        token: Some(agent.secret.clone()),
        message: AgentMessage::JobUpdate {
            job_id: 999,
            status: fc_wire::JobUpdateStatus::Running,
            info: "x".into(),
        },
    };

    let err = dispatch(frame, "10.0.0.5", &mut host, &ctx, &tx).await.unwrap_err();
    assert_eq!(err.kind(), fc_core::error::ErrorKind::NotFound);
}

#[tokio::test]
async fn end_to_end_session_over_an_in_memory_duplex_places_the_stream_in_pending() {
    let ctx = test_context(MemoryStore::new());
    let (client, server) = tokio::io::duplex(4096);
    let (server_read, server_write) = tokio::io::split(server);

    let session = tokio::spawn(run_agent_session(
        server_read,
        server_write,
        "10.0.0.9".to_string(),
        ctx.clone(),
    ));

    let (mut client_read, mut client_write) = tokio::io::split(client);
    let join = AgentFrame {
        token: None,
        message: AgentMessage::JoinRequest {
            arch: "amd64".into(),
            os: "linux".into(),
            os_version: "12".into(),
            distro: "debian".into(),
            distro_version: "12".into(),
            version: "1.0.0".into(),
        },
    };
    write_frame(&mut client_write, &join).await.expect("writes join request");
    drop(client_write);

    let _ = tokio::time::timeout(std::time::Duration::from_secs(1), session)
        .await
        .expect("session task completes");

    assert!(ctx.pending.contains("10.0.0.9"));

    // draining the client side avoids an unused-variable warning on `client_read`
    // in case the writer task never sends anything back for this frame.
    let mut scratch = [0u8; 1];
    let _ = tokio::io::AsyncReadExt::read(&mut client_read, &mut scratch).await;
}

// SPDX-License-Identifier: MIT

//! `fleetd`: the controller process. Loads configuration (§6), builds the
//! process-wide [`Context`](fleetd::Context), and runs four kinds of
//! task to completion — the agent session acceptor, the RPC facade
//! acceptor, the scheduler, and the worker — until a shutdown signal
//! fires (§5).

use fc_core::error::Result;
use fc_storage::MemoryStore;
use fc_wire::framing::{read_frame, write_frame};
use fc_wire::RequestEnvelope;
use fleetd::config::{self, DaemonConfig};
use fleetd::context::{Context, Shutdown};
use fleetd::rpc::{handle_request, DaemonTransport, PendingUpload};
use fleetd::session::run_agent_session;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fleetd: fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = config::load()?;
    init_logging(&config);

    // §1 non-goals leave the relational store an external collaborator;
    // this binary's default adapter is the in-memory reference store
    // (§4.2) so the workspace runs standalone. A deployment that needs
    // durability swaps `MemoryStore` for a real `Store` impl here —
    // nothing else in this function changes.
    let store = Arc::new(MemoryStore::new());
    let ctx = Context::build(config, store).await?;

    info!(
        rpc_port = ctx.config.grpc.port,
        agent_port = ctx.config.grpc.agent_port(),
        "fleetd starting"
    );

    let mut shutdown = Shutdown::new();

    spawn_agent_listener(&mut shutdown, ctx.clone()).await?;
    spawn_rpc_listener(&mut shutdown, ctx.clone()).await?;
    spawn_engine(&mut shutdown, ctx.clone());

    wait_for_shutdown_signal().await;
    info!("fleetd shutting down");
    ctx.cancel.cancel();

    shutdown.wait().await;
    info!("fleetd stopped");
    Ok(())
}

fn init_logging(config: &DaemonConfig) {
    let level = config
        .log
        .as_ref()
        .map(|l| l.level.clone())
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log.as_ref().and_then(|l| l.file.clone()) {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let file_name = path.file_name().unwrap_or_else(|| path.as_os_str());
            let appender = tracing_appender::rolling::never(
                dir.unwrap_or_else(|| std::path::Path::new(".")),
                file_name,
            );
            let (writer, guard) = tracing_appender::non_blocking(appender);
            // Leaked intentionally: the guard must outlive every log call
            // for the remainder of the process, which is the process
            // itself here.
            Box::leak(Box::new(guard));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

/// §4.5's stream: plain framed TCP on `grpc.agent_port()`, one spawned
/// task per accepted connection running [`run_agent_session`] to
/// completion.
async fn spawn_agent_listener(shutdown: &mut Shutdown, ctx: Arc<Context>) -> Result<()> {
    let addr = format!("0.0.0.0:{}", ctx.config.grpc.agent_port());
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| fc_core::Error::unknown(format!("binding agent listener on {addr}: {e}")))?;
    info!(%addr, "agent session listener bound");

    let cancel = ctx.cancel.clone();
    shutdown.spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("agent session acceptor stopping");
                    return;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let peer_ip = peer.ip().to_string();
                            let (reader, writer) = stream.into_split();
                            let ctx = ctx.clone();
                            tokio::spawn(run_agent_session(reader, writer, peer_ip, ctx));
                        }
                        Err(e) => warn!(error = %e, "agent listener accept error"),
                    }
                }
            }
        }
    });
    Ok(())
}

/// §4.9's control connection: the same length-prefixed framing, carrying
/// [`RequestEnvelope`]/[`fc_wire::Response`] instead of agent frames. A
/// connection may carry any number of calls in sequence; `upload` tracks
/// a `*Chunk`/`*End` accumulation across calls on the same connection,
/// per §4.9.
async fn spawn_rpc_listener(shutdown: &mut Shutdown, ctx: Arc<Context>) -> Result<()> {
    let addr = format!("0.0.0.0:{}", ctx.config.grpc.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| fc_core::Error::unknown(format!("binding rpc listener on {addr}: {e}")))?;
    info!(%addr, "rpc facade listener bound");

    let cancel = ctx.cancel.clone();
    shutdown.spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("rpc acceptor stopping");
                    return;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, _peer)) => {
                            let ctx = ctx.clone();
                            tokio::spawn(run_rpc_connection(stream, ctx));
                        }
                        Err(e) => warn!(error = %e, "rpc listener accept error"),
                    }
                }
            }
        }
    });
    Ok(())
}

async fn run_rpc_connection(stream: tokio::net::TcpStream, ctx: Arc<Context>) {
    let (mut reader, mut writer) = stream.into_split();
    let mut upload = PendingUpload::None;

    loop {
        let envelope: RequestEnvelope = match read_frame(&mut reader).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "rpc connection read error");
                return;
            }
        };

        let response = handle_request(
            &ctx,
            envelope.token.as_deref(),
            &mut upload,
            envelope.request,
        )
        .await;

        if let Err(e) = write_frame(&mut writer, &response).await {
            warn!(error = %e, "rpc connection write error");
            return;
        }
    }
}

/// §4.7/§5: the scheduler and worker tasks, wired through an unbuffered
/// (capacity-1) channel and the daemon's own `accepted` pool via
/// [`DaemonTransport`].
fn spawn_engine(shutdown: &mut Shutdown, ctx: Arc<Context>) {
    let (tx, mut rx) = tokio::sync::mpsc::channel(1);

    let scheduler_ctx = ctx.clone();
    shutdown.spawn(async move {
        fc_engine::run_scheduler(
            &scheduler_ctx.jobs,
            scheduler_ctx.clock.as_ref(),
            &tx,
            &scheduler_ctx.cancel,
        )
        .await;
    });

    let worker_ctx = ctx.clone();
    shutdown.spawn(async move {
        let transport = DaemonTransport { ctx: worker_ctx.clone() };
        fc_engine::run_worker(
            &mut rx,
            worker_ctx.store.as_ref(),
            &transport,
            worker_ctx.clock.as_ref(),
            &worker_ctx.cancel,
        )
        .await;
    });
}

async fn wait_for_shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {}
        Err(e) => error!(error = %e, "failed to install ctrl-c handler; shutting down anyway"),
    }
}

// SPDX-License-Identifier: MIT

use crate::context::Context;
use crate::pool::OutboundFrame;
use fc_core::agent::NewAgent;
use fc_core::error::{Error, Result};
use fc_core::job::JobId;
use fc_wire::framing::{read_frame, write_frame};
use fc_wire::{AgentFrame, AgentMessage, ServerFrame};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Runs one agent's stream to completion (§4.5): dispatches every frame
/// it sends, and drains server→agent frames addressed to it by
/// `AgentAccept` (§4.5) or the Worker (§4.7) through its
/// [`crate::pool::AgentHandle`]. `peer_ip` is the IP portion of the
/// socket's peer address, used as the host for an unauthenticated
/// `JoinRequest` (§4.5 step 1).
pub async fn run_agent_session<R, W>(reader: R, writer: W, peer_ip: String, ctx: Arc<Context>)
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<OutboundFrame>();
    let writer_task = tokio::spawn(run_writer(writer, rx));

    let host = read_loop(reader, &peer_ip, &ctx, &tx).await;

    if let Some(host) = host {
        ctx.accepted.delete(&host);
    }
    drop(tx);
    let _ = writer_task.await;
}

async fn run_writer<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<OutboundFrame>)
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = rx.recv().await {
        let server_frame = match frame {
            OutboundFrame::JoinResponse(r) => ServerFrame::JoinResponse(r),
            OutboundFrame::JobNew(j) => ServerFrame::JobNew(j),
        };
        if let Err(e) = write_frame(&mut writer, &server_frame).await {
            warn!(error = %e, "agent session writer stopping");
            return;
        }
    }
}

/// The read side of §4.5: one iteration per received frame, terminating
/// on EOF or the first frame that fails host determination or dispatch.
/// Returns the host this stream ended up authenticated as, if any, so
/// the caller can run end-of-stream cleanup (§4.5 step 3).
async fn read_loop<R>(
    mut reader: R,
    peer_ip: &str,
    ctx: &Arc<Context>,
    tx: &mpsc::UnboundedSender<OutboundFrame>,
) -> Option<String>
where
    R: AsyncRead + Unpin,
{
    let mut host: Option<String> = None;

    loop {
        let frame: AgentFrame = match read_frame(&mut reader).await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                debug!("agent session closed by peer");
                return host;
            }
            Err(e) => {
                warn!(error = %e, "agent session read error");
                return host;
            }
        };

        match dispatch(frame, peer_ip, &mut host, ctx, tx).await {
            Ok(()) => {}
            Err(e) => {
                warn!(error = %e, "agent session terminating on dispatch error");
                return host;
            }
        }
    }
}

/// Step 1 (determine host) and step 2 (dispatch by message type) of §4.5.
async fn dispatch(
    frame: AgentFrame,
    peer_ip: &str,
    host: &mut Option<String>,
    ctx: &Arc<Context>,
    tx: &mpsc::UnboundedSender<OutboundFrame>,
) -> Result<()> {
    let resolved_host = match &frame.message {
        AgentMessage::JoinRequest { .. } => peer_ip.to_string(),
        _ => {
            let token = frame
                .token
                .as_deref()
                .ok_or_else(|| Error::invalid_argument("agent frame missing bearer token"))?;
            let accepted = ctx.store.agents_list_accepted().await?;
            fc_auth::validate_agent(token, &accepted)
                .map(str::to_string)
                .ok_or_else(|| Error::invalid_argument("agent token does not validate"))?
        }
    };
    *host = Some(resolved_host.clone());

    match frame.message {
        AgentMessage::JoinRequest {
            arch,
            os,
            os_version,
            distro,
            distro_version,
            version,
        } => {
            ctx.store
                .agents_insert(NewAgent {
                    host: resolved_host.clone(),
                    accepted: false,
                    secret: String::new(),
                    object_key: String::new(),
                    ssh_port: 22,
                    ssh_user: "drlm".to_string(),
                    ssh_host_keys: Vec::new(),
                    arch,
                    os,
                    os_version,
                    distro,
                    distro_version,
                    version,
                })
                .await?;
            ctx.pending.add(resolved_host, tx.clone());
            Ok(())
        }
        AgentMessage::ConnectionEstablish => {
            ctx.accepted.add(resolved_host, tx.clone());
            Ok(())
        }
        AgentMessage::JobUpdate { job_id, status, info } => {
            let mut job = ctx.store.jobs_find_by_id(JobId::from_raw(job_id)).await?;
            job.status = status.into();
            job.append_info(&info);
            ctx.store.jobs_update(job).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

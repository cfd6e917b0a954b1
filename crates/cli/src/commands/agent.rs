// SPDX-License-Identifier: MIT

use crate::client::{self, DaemonClient};
use crate::output::{self, OutputFormat};
use fc_wire::{Request, Response};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// `bytes.chunks(CHUNK_SIZE)`, except an empty input yields one empty
/// chunk instead of none — the `*End` call requires at least one
/// `*Chunk` to have primed `PendingUpload` on the facade side (§4.9).
fn chunks_at_least_once(bytes: &[u8]) -> Vec<&[u8]> {
    if bytes.is_empty() {
        vec![&[][..]]
    } else {
        bytes.chunks(CHUNK_SIZE).collect()
    }
}

pub async fn add(client: &DaemonClient, host: String) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::AgentAdd { host }).await? {
        Response::Agent { agent } => {
            println!("added {}", agent.host);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to agent add: {other:?}")),
    }
}

pub async fn accept(client: &DaemonClient, host: String) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::AgentAccept { host }).await? {
        Response::Agent { agent } => {
            println!("accepted {}", agent.host);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to agent accept: {other:?}")),
    }
}

pub async fn delete(client: &DaemonClient, host: String) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::AgentDelete { host }).await? {
        Response::Ok => {
            println!("deleted");
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to agent delete: {other:?}")),
    }
}

pub async fn get(client: &DaemonClient, host: String, format: OutputFormat) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::AgentGet { host }).await? {
        Response::Agent { agent } => {
            output::print_one(format, &agent, |a| output::agent_line(a));
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to agent get: {other:?}")),
    }
}

pub async fn list(client: &DaemonClient, format: OutputFormat) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::AgentList).await? {
        Response::Agents { agents } => {
            output::print_many(format, &agents, output::agent_line);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to agent list: {other:?}")),
    }
}

pub async fn requests(client: &DaemonClient, format: OutputFormat) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::AgentRequestList).await? {
        Response::Agents { agents } => {
            output::print_many(format, &agents, output::agent_line);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to agent requests: {other:?}")),
    }
}

/// `AgentInstall` (§6): chunks `binary_path` into `*Chunk` frames over a
/// single connection, terminated by `*End` (§4.9).
#[allow(clippy::too_many_arguments)]
pub async fn install(
    client: &DaemonClient,
    host: String,
    ssh_port: u16,
    ssh_user: String,
    ssh_password: String,
    binary_path: &Path,
) -> anyhow::Result<()> {
    let token = client::require_token()?;
    let bytes = std::fs::read(binary_path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", binary_path.display()))?;

    let mut conn = client.connect().await?;
    for chunk in chunks_at_least_once(&bytes) {
        let response = conn
            .call(
                Some(token.clone()),
                Request::AgentInstallChunk {
                    host: host.clone(),
                    ssh_port,
                    ssh_user: ssh_user.clone(),
                    ssh_password: ssh_password.clone(),
                    bin_chunk: chunk.to_vec(),
                },
            )
            .await?;
        if !matches!(response, Response::Ok) {
            return Err(anyhow::anyhow!("unexpected response to install chunk: {response:?}"));
        }
    }

    match conn.call(Some(token), Request::AgentInstallEnd).await? {
        Response::Agent { agent } => {
            println!("installed on {}", agent.host);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to install end: {other:?}")),
    }
}

/// `AgentPluginAdd` (§6), same chunked shape as [`install`].
#[allow(clippy::too_many_arguments)]
pub async fn plugin_add(
    client: &DaemonClient,
    host: String,
    repo: String,
    plugin: String,
    version: String,
    arch: Vec<String>,
    os: Vec<String>,
    binary_path: &Path,
) -> anyhow::Result<()> {
    let token = client::require_token()?;
    let bytes = std::fs::read(binary_path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", binary_path.display()))?;

    let mut conn = client.connect().await?;
    for chunk in chunks_at_least_once(&bytes) {
        let response = conn
            .call(
                Some(token.clone()),
                Request::AgentPluginAddChunk {
                    host: host.clone(),
                    repo: repo.clone(),
                    plugin: plugin.clone(),
                    version: version.clone(),
                    arch: arch.clone(),
                    os: os.clone(),
                    bin_chunk: chunk.to_vec(),
                },
            )
            .await?;
        if !matches!(response, Response::Ok) {
            return Err(anyhow::anyhow!("unexpected response to plugin chunk: {response:?}"));
        }
    }

    match conn.call(Some(token), Request::AgentPluginAddEnd).await? {
        Response::Ok => {
            println!("plugin {repo}/{plugin}@{version} added to {host}");
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to plugin end: {other:?}")),
    }
}

// SPDX-License-Identifier: MIT

//! Connection and token persistence for the thin operator client (§6,
//! SPEC_FULL §2 component 12): every subcommand opens a TCP connection
//! to the RPC facade, sends one or more framed [`Request`]s, and maps
//! the matching [`Response`]/`Response::Error` pair back onto either a
//! value or an [`ExitError`].

use crate::exit_error::{from_response_error, ExitError};
use fc_wire::framing::{read_frame, write_frame};
use fc_wire::{Request, RequestEnvelope, Response};
use std::path::PathBuf;
use tokio::net::TcpStream;

/// One TCP connection to the RPC facade. Most commands send a single
/// request and drop the connection; the client-streaming calls
/// (`AgentInstall`, `AgentPluginAdd`) keep a connection open across a
/// `*Chunk` sequence terminated by `*End`, since the facade's upload
/// accumulator (§4.9) is scoped to one connection.
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| anyhow::anyhow!("connecting to fleetd at {addr}: {e}"))?;
        Ok(Self { stream })
    }

    /// Sends one request and returns the matching response, translating
    /// `Response::Error` into `Err(ExitError)` so callers never have to
    /// match on it themselves.
    pub async fn call(&mut self, token: Option<String>, request: Request) -> anyhow::Result<Response> {
        let envelope = RequestEnvelope { token, request };
        write_frame(&mut self.stream, &envelope).await?;
        let response: Response = read_frame(&mut self.stream)
            .await?
            .ok_or_else(|| anyhow::anyhow!("fleetd closed the connection before responding"))?;
        match response {
            Response::Error { status, message } => Err(from_response_error(status, message).into()),
            other => Ok(other),
        }
    }
}

/// Resolves `host:port`, a dotfile-persisted bearer token, and opens
/// connections on demand. Every field is overridable from the command
/// line (`--host`/`--port`) or the `FLEETCTL_TOKEN_FILE` environment
/// variable, mirroring `fleetd`'s own `FLEETD_`-prefixed env overrides.
pub struct DaemonClient {
    addr: String,
}

impl DaemonClient {
    pub fn new(host: &str, port: u16) -> Self {
        Self { addr: format!("{host}:{port}") }
    }

    pub async fn connect(&self) -> anyhow::Result<Connection> {
        Connection::connect(&self.addr).await
    }

    pub async fn call(&self, token: Option<String>, request: Request) -> anyhow::Result<Response> {
        self.connect().await?.call(token, request).await
    }
}

/// Where the bearer token issued by `UserLogin` (§6) is cached between
/// invocations of this short-lived CLI process.
pub fn token_path() -> PathBuf {
    if let Some(path) = std::env::var_os("FLEETCTL_TOKEN_FILE") {
        return PathBuf::from(path);
    }
    let base = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
    base.join("fleetctl").join("token")
}

pub fn load_token() -> Option<String> {
    std::fs::read_to_string(token_path())
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn save_token(token: &str) -> anyhow::Result<()> {
    let path = token_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, token)?;
    Ok(())
}

pub fn require_token() -> Result<String, ExitError> {
    load_token().ok_or_else(|| {
        ExitError::new(3, "not logged in — run `fleetctl login` first")
    })
}

// SPDX-License-Identifier: MIT

use fc_core::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// `grpc.*` — the RPC facade's listen settings (§6). TLS fields are
/// optional; when both are present the facade terminates TLS itself,
/// otherwise it listens in plaintext.
#[derive(Debug, Clone, Deserialize)]
pub struct GrpcConfig {
    pub port: u16,
    #[serde(default)]
    pub tls: bool,
    #[serde(default)]
    pub cert_path: Option<PathBuf>,
    #[serde(default)]
    pub key_path: Option<PathBuf>,
    /// Port the agent session stream (§4.5) listens on. Not named in
    /// spec.md §6's configuration keys — the spec's RPC surface bundles
    /// `AgentConnection` with every other call on one logical service;
    /// this workspace's framing has no multiplexed-service concept, so
    /// the agent stream gets its own listener, defaulting to `port + 1`
    /// when unset.
    #[serde(default)]
    pub agent_port: Option<u16>,
}

impl GrpcConfig {
    pub fn agent_port(&self) -> u16 {
        self.agent_port.unwrap_or_else(|| self.port.wrapping_add(1))
    }
}

/// `security.*` — password hashing cost, the JWT signing secret, token
/// lifespans and the path the controller's SSH key pair lives at (§4.1,
/// §4.6, §6).
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,
    pub tokens_secret: String,
    pub tokens_lifespan_secs: i64,
    pub login_lifespan_secs: i64,
    pub ssh_keys_path: PathBuf,
}

/// `db.*` — the relational store's connection parameters. §1 scopes the
/// store itself out (an external collaborator behind [`fc_storage::Store`]);
/// this struct only exists so a production adapter has somewhere to read
/// its connection parameters from.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// `minio.*` — the object-store endpoint the S3/admin clients connect to.
#[derive(Debug, Clone, Deserialize)]
pub struct MinioConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub ssl: bool,
    #[serde(default)]
    pub cert_path: Option<PathBuf>,
    pub access_key: String,
    pub secret_key: String,
    pub location: String,
}

impl MinioConfig {
    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

/// `log.*` — `tracing-subscriber` level filter and optional rolling file
/// sink path (§6).
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub grpc: GrpcConfig,
    pub security: SecurityConfig,
    pub db: DbConfig,
    pub minio: MinioConfig,
    #[serde(default)]
    pub log: Option<LogConfig>,
}

/// Search path and env prefix mirroring the original's Viper setup (§6):
/// `./core.toml`, `~/.drlm/core.toml`, `~/.config/drlm/core.toml`,
/// `/etc/drlm/core.toml`, each optional, later entries overriding
/// earlier ones; then environment variables prefixed `FLEETD_` with
/// `.` replaced by `_` override everything (e.g. `FLEETD_GRPC_PORT`).
pub fn load() -> Result<DaemonConfig> {
    let mut builder = config::Config::builder();

    for path in search_paths() {
        let file = path.join("core.toml");
        builder = builder.add_source(config::File::from(file).required(false));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("FLEETD")
            .separator("_")
            .try_parsing(true),
    );

    let raw = builder
        .build()
        .map_err(|e| Error::invalid_argument(format!("loading configuration: {e}")))?;

    raw.try_deserialize()
        .map_err(|e| Error::invalid_argument(format!("parsing configuration: {e}")))
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".")];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".drlm"));
        paths.push(home.join(".config").join("drlm"));
    }
    paths.push(PathBuf::from("/etc/drlm"));
    paths
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

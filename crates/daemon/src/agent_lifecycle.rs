// SPDX-License-Identifier: MIT

use crate::pool::{ConnPool, OutboundFrame};
use fc_core::agent::{Agent, NewAgent};
use fc_core::error::{Error, Result};
use fc_objectstore::{ObjectStore, ObjectStoreAdmin, ObjectStoreGateway};
use fc_ssh::{install, AgentCredentials};
use fc_storage::Store;
use fc_wire::JoinResponse;
use russh_keys::key::KeyPair;

const PACKAGE_REMOTE_PATH: &str = "/tmp/drlm-agent.pkg";
const CONFIG_REMOTE_PATH: &str = "/etc/drlm/agent.toml";

/// `AgentAdd` (operator pre-accepted, §4.6): insert an already-accepted
/// row, then allocate this agent's object-store user and binary bucket.
/// No connection needs to be live for this — the credentials are handed
/// out later, at `Install` time.
pub async fn add_agent<S: ObjectStore, A: ObjectStoreAdmin>(
    store: &dyn Store,
    gateway: &ObjectStoreGateway<S, A>,
    host: String,
) -> Result<Agent> {
    let agent = store
        .agents_insert(NewAgent {
            host,
            accepted: true,
            secret: String::new(),
            object_key: String::new(),
            ssh_port: 22,
            ssh_user: "drlm".to_string(),
            ssh_host_keys: Vec::new(),
            arch: String::new(),
            os: String::new(),
            os_version: String::new(),
            distro: String::new(),
            distro_version: String::new(),
            version: String::new(),
        })
        .await?;

    provision_object_store(store, gateway, agent).await
}

/// `AgentAccept` (§4.5, §4.6): approve a pending join request. Requires
/// both the row to be in pending state and a live stream still sitting
/// in the pending pool — fails with `FailedPrecondition` otherwise.
/// Allocates object-store credentials, hands the stream its
/// `JoinResponse`, and moves the pool entry into `accepted` before
/// returning (spec.md §9, "double-delivery on accept": an agent that
/// instead reconnects fresh and sends its own `ConnectionEstablish`
/// still lands in `accepted`, since the row is already marked accepted
/// either way).
pub async fn accept_agent<S: ObjectStore, A: ObjectStoreAdmin>(
    store: &dyn Store,
    gateway: &ObjectStoreGateway<S, A>,
    pending_pool: &ConnPool,
    accepted_pool: &ConnPool,
    host: String,
) -> Result<Agent> {
    let pending = store.agents_find_by_host(&host).await?;
    if pending.accepted {
        return Err(Error::failed_precondition(format!(
            "agent {host} is already accepted"
        )));
    }

    let handle = pending_pool.delete(&host).ok_or_else(|| {
        Error::failed_precondition(format!("agent {host} has no pending stream to accept"))
    })?;

    let mut agent = pending;
    agent.accepted = true;
    let agent = provision_object_store(store, gateway, agent).await?;

    let response = JoinResponse::accept(
        agent.secret.clone(),
        Agent::object_store_user(agent.id),
        agent.object_key.clone(),
    );
    if handle.send(OutboundFrame::JoinResponse(response)).is_ok() {
        accepted_pool.add(host, handle);
    }

    Ok(agent)
}

async fn provision_object_store<S: ObjectStore, A: ObjectStoreAdmin>(
    store: &dyn Store,
    gateway: &ObjectStoreGateway<S, A>,
    mut agent: Agent,
) -> Result<Agent> {
    let user = Agent::object_store_user(agent.id);
    let secret = gateway.create_user(&user).await?;
    gateway
        .make_bucket_for_user(&user, Some(Agent::binary_bucket_name(agent.id)))
        .await?;

    agent.object_key = secret;
    store.agents_update(agent).await
}

/// `AgentInstall` (§4.6, §4.9): push the already-accumulated package
/// bytes onto `host` over SSH, using the object-store credentials
/// `provision_object_store` already persisted, then record what the
/// target reported about itself.
pub async fn install_agent(
    store: &dyn Store,
    controller_key: &KeyPair,
    controller_public_key_line: &str,
    host: &str,
    ssh_port: u16,
    ssh_user: &str,
    ssh_password: &str,
    package_bytes: &[u8],
) -> Result<Agent> {
    let mut agent = store.agents_find_by_host(host).await?;
    if agent.object_key.is_empty() {
        return Err(Error::failed_precondition(format!(
            "agent {host} has no object-store credentials yet; accept it first"
        )));
    }

    let credentials = AgentCredentials {
        agent_secret: agent.secret.clone(),
        object_access_key: Agent::object_store_user(agent.id),
        object_secret_key: agent.object_key.clone(),
    };

    let outcome = install(
        host,
        ssh_port,
        ssh_user,
        ssh_password,
        controller_key,
        controller_public_key_line,
        package_bytes,
        PACKAGE_REMOTE_PATH,
        CONFIG_REMOTE_PATH,
        &credentials,
    )
    .await?;

    agent.ssh_port = ssh_port;
    agent.ssh_user = ssh_user.to_string();
    agent.ssh_host_keys = outcome.host_keys;
    agent.os = outcome.os.to_string();
    agent.os_version = outcome.os_version;
    agent.distro = outcome.distro;
    agent.arch = outcome.arch;

    store.agents_update(agent).await
}

#[cfg(test)]
#[path = "agent_lifecycle_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

use crate::os_detect::{normalize_arch, TargetOs};
use crate::session::SshSession;
use base64::Engine;
use fc_core::error::{Error, Result};
use russh_keys::key::KeyPair;

/// Everything the install flow needs to write the remote configuration
/// file with (§4.6): the agent's bearer secret plus its object-store
/// credentials.
pub struct AgentCredentials {
    pub agent_secret: String,
    pub object_access_key: String,
    pub object_secret_key: String,
}

/// Outcome of a completed install: the OS/arch the target reported, and
/// the host keys discovered while connecting — the caller persists these
/// on the Agent row joined by `|||` (§4.6).
pub struct InstallOutcome {
    pub os: TargetOs,
    pub os_version: String,
    pub distro: String,
    pub arch: String,
    pub host_keys: Vec<String>,
}

/// Pushes the agent binary onto a new host over SSH (§4.6):
/// 1. Open a password session, discovering host keys along the way.
/// 2. Detect OS/arch.
/// 3. Upload the controller's public key as an authorized key for the
///    install user, then disable further password logins.
/// 4. Close, reopen via the uploaded key.
/// 5. Run the OS-specific package install command against the already
///    uploaded package file.
/// 6. Write the agent's config file (secret + object-store credentials).
pub async fn install(
    host: &str,
    ssh_port: u16,
    ssh_user: &str,
    ssh_password: &str,
    controller_key: &KeyPair,
    controller_public_key_line: &str,
    package_bytes: &[u8],
    package_remote_path: &str,
    config_remote_path: &str,
    credentials: &AgentCredentials,
) -> Result<InstallOutcome> {
    let mut session = SshSession::connect_password((host, ssh_port), ssh_user, ssh_password).await?;

    let (status, distro_id) = session.exec("sh -c '. /etc/os-release && echo $ID'").await?;
    if status != 0 {
        return Err(Error::unknown("failed to read /etc/os-release on target"));
    }
    let distro = String::from_utf8_lossy(&distro_id).trim().to_string();
    let os = TargetOs::from_distro_id(&distro);

    let (status, version_id) = session.exec("sh -c '. /etc/os-release && echo $VERSION_ID'").await?;
    if status != 0 {
        return Err(Error::unknown("failed to read version id on target"));
    }
    let os_version = String::from_utf8_lossy(&version_id).trim().to_string();

    let (status, uname_m) = session.exec("uname -m").await?;
    if status != 0 {
        return Err(Error::unknown("failed to read architecture on target"));
    }
    let arch = normalize_arch(&String::from_utf8_lossy(&uname_m));

    let append_key_cmd = format!(
        "mkdir -p ~/.ssh && echo '{controller_public_key_line}' >> ~/.ssh/authorized_keys && chmod 600 ~/.ssh/authorized_keys"
    );
    let (status, output) = session.exec(&append_key_cmd).await?;
    if status != 0 {
        return Err(Error::unknown(format!(
            "authorized_keys upload failed: {}",
            String::from_utf8_lossy(&output)
        )));
    }

    let discovered_host_keys = session.host_keys.clone();
    session.close().await?;

    let mut session = SshSession::connect_key((host, ssh_port), ssh_user, controller_key).await?;

    let encoded_package = base64::engine::general_purpose::STANDARD.encode(package_bytes);
    let write_package_cmd =
        format!("echo '{encoded_package}' | base64 -d > {package_remote_path}");
    let (status, output) = session.exec(&write_package_cmd).await?;
    if status != 0 {
        return Err(Error::unknown(format!(
            "package upload failed: {}",
            String::from_utf8_lossy(&output)
        )));
    }

    let install_cmd = os.package_install_command(package_remote_path)?;
    let (status, output) = session.exec(&install_cmd).await?;
    if status != 0 {
        return Err(Error::unknown(format!(
            "package install failed: {}",
            String::from_utf8_lossy(&output)
        )));
    }

    let config_contents = render_agent_config(credentials);
    let write_config_cmd = format!(
        "cat > {config_remote_path} <<'DRLM_CONFIG_EOF'\n{config_contents}\nDRLM_CONFIG_EOF"
    );
    let (status, output) = session.exec(&write_config_cmd).await?;
    if status != 0 {
        return Err(Error::unknown(format!(
            "writing config failed: {}",
            String::from_utf8_lossy(&output)
        )));
    }

    session.close().await?;

    Ok(InstallOutcome {
        os,
        os_version,
        distro,
        arch,
        host_keys: discovered_host_keys,
    })
}

fn render_agent_config(credentials: &AgentCredentials) -> String {
    format!(
        "secret = \"{}\"\nobject_access_key = \"{}\"\nobject_secret_key = \"{}\"\n",
        credentials.agent_secret, credentials.object_access_key, credentials.object_secret_key
    )
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;

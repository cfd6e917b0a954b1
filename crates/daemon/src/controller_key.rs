// SPDX-License-Identifier: MIT

use fc_core::error::{Error, Result};
use russh_keys::key::KeyPair;
use russh_keys::PublicKeyBase64;
use std::path::Path;

/// Loads the controller's SSH identity from `security.ssh_keys_path`
/// (§6), generating and persisting a fresh ed25519 key pair the first
/// time the daemon starts — `Install` (§4.6) needs this key to upload an
/// authorized-key entry on every newly enrolled host, so it must outlive
/// any single install run.
pub fn load_or_generate(path: &Path) -> Result<KeyPair> {
    if path.exists() {
        return russh_keys::load_secret_key(path, None)
            .map_err(|e| Error::unknown(format!("loading controller ssh key {}: {e}", path.display())));
    }

    let key = KeyPair::generate_ed25519()
        .ok_or_else(|| Error::unknown("failed to generate controller ed25519 key pair"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::unknown(format!("creating {}: {e}", parent.display())))?;
    }
    russh_keys::encode_pkcs8_pem(&key, path)
        .map_err(|e| Error::unknown(format!("writing controller ssh key {}: {e}", path.display())))?;

    Ok(key)
}

/// The `authorized_keys`-format line for the controller's public key,
/// the exact string `Install` (§4.6) appends on the target host.
pub fn public_key_line(key: &KeyPair) -> String {
    format!("{} {} fleetd-controller", key.name(), key.public_key_base64())
}

#[cfg(test)]
#[path = "controller_key_tests.rs"]
mod tests;

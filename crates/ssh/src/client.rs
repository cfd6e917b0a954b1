// SPDX-License-Identifier: MIT

use russh::client::{Handle, Handler};
use russh_keys::key::PublicKey;
use std::sync::{Arc, Mutex};

/// Records every host key the server offers during key exchange instead
/// of checking it against a known-hosts file — host key *discovery* is
/// the explicit first step of Install (§4.6), not verification against a
/// prior connection.
#[derive(Clone, Default)]
pub struct DiscoveringHandler {
    pub discovered_keys: Arc<Mutex<Vec<String>>>,
}

impl Handler for DiscoveringHandler {
    type Error = russh::Error;

    async fn check_server_key(&mut self, server_public_key: &PublicKey) -> Result<bool, Self::Error> {
        let encoded = server_public_key
            .fingerprint(russh_keys::HashAlg::Sha256)
            .to_string();
        self.discovered_keys.lock().expect("host key list mutex poisoned").push(encoded);
        Ok(true)
    }
}

pub type SshHandle = Handle<DiscoveringHandler>;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

use crate::client::{DiscoveringHandler, SshHandle};
use fc_core::error::{Error, Result};
use russh::client;
use russh_keys::key::KeyPair;
use std::sync::Arc;

/// A connected SSH session plus the host keys discovered while
/// connecting. `connect_password` and `connect_key` both populate
/// `host_keys` via the same [`DiscoveringHandler`], so re-opening with a
/// key doesn't lose the keys discovered during the first, password-based
/// connection.
pub struct SshSession {
    handle: SshHandle,
    pub host_keys: Vec<String>,
}

impl SshSession {
    pub async fn connect_password(
        addr: (&str, u16),
        user: &str,
        password: &str,
    ) -> Result<Self> {
        let handler = DiscoveringHandler::default();
        let discovered = handler.discovered_keys.clone();
        let config = Arc::new(client::Config::default());
        let mut handle = client::connect(config, addr, handler)
            .await
            .map_err(|e| Error::unavailable(format!("connecting to {}:{}: {e}", addr.0, addr.1)))?;
        let authenticated = handle
            .authenticate_password(user, password)
            .await
            .map_err(|e| Error::unauthenticated(format!("password auth failed: {e}")))?;
        if !authenticated {
            return Err(Error::unauthenticated("password auth rejected"));
        }
        let host_keys = discovered.lock().expect("host key list mutex poisoned").clone();
        Ok(Self { handle, host_keys })
    }

    pub async fn connect_key(
        addr: (&str, u16),
        user: &str,
        key: &KeyPair,
    ) -> Result<Self> {
        let handler = DiscoveringHandler::default();
        let discovered = handler.discovered_keys.clone();
        let config = Arc::new(client::Config::default());
        let mut handle = client::connect(config, addr, handler)
            .await
            .map_err(|e| Error::unavailable(format!("connecting to {}:{}: {e}", addr.0, addr.1)))?;
        let authenticated = handle
            .authenticate_publickey(user, Arc::new(key.clone()))
            .await
            .map_err(|e| Error::unauthenticated(format!("key auth failed: {e}")))?;
        if !authenticated {
            return Err(Error::unauthenticated("key auth rejected"));
        }
        let host_keys = discovered.lock().expect("host key list mutex poisoned").clone();
        Ok(Self { handle, host_keys })
    }

    /// Run a command to completion, returning its exit status and the
    /// bytes written to stdout (stderr is appended, matching how the
    /// original surfaces a single combined error message on failure).
    pub async fn exec(&mut self, command: &str) -> Result<(u32, Vec<u8>)> {
        let mut channel = self
            .handle
            .channel_open_session()
            .await
            .map_err(|e| Error::unavailable(format!("opening channel: {e}")))?;
        channel
            .exec(true, command)
            .await
            .map_err(|e| Error::unknown(format!("exec {command}: {e}")))?;

        let mut output = Vec::new();
        let mut exit_status = 0u32;
        while let Some(msg) = channel.wait().await {
            match msg {
                russh::ChannelMsg::Data { ref data } => output.extend_from_slice(data),
                russh::ChannelMsg::ExtendedData { ref data, .. } => output.extend_from_slice(data),
                russh::ChannelMsg::ExitStatus { exit_status: status } => exit_status = status,
                russh::ChannelMsg::Eof | russh::ChannelMsg::Close => break,
                _ => {}
            }
        }
        Ok((exit_status, output))
    }

    pub async fn close(self) -> Result<()> {
        self.handle
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(|e| Error::unknown(format!("disconnect: {e}")))
    }
}

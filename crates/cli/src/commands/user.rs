// SPDX-License-Identifier: MIT

use crate::client::{self, DaemonClient};
use crate::output::{self, OutputFormat};
use fc_wire::{Request, Response};

pub async fn login(client: &DaemonClient, username: String, password: String) -> anyhow::Result<()> {
    match client.call(None, Request::UserLogin { username, password }).await? {
        Response::Token { token, expires_at } => {
            client::save_token(&token)?;
            println!("logged in, token expires {expires_at}");
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to login: {other:?}")),
    }
}

pub async fn renew(client: &DaemonClient) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::UserTokenRenew).await? {
        Response::Token { token, expires_at } => {
            client::save_token(&token)?;
            println!("renewed, token expires {expires_at}");
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to token renew: {other:?}")),
    }
}

pub async fn add(client: &DaemonClient, username: String, password: String) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client
        .call(Some(token), Request::UserAdd { username, password })
        .await?
    {
        Response::User { user } => {
            println!("created user {}", user.username);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to user add: {other:?}")),
    }
}

pub async fn delete(client: &DaemonClient, username: String) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::UserDelete { username }).await? {
        Response::Ok => {
            println!("deleted");
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to user delete: {other:?}")),
    }
}

pub async fn list(client: &DaemonClient, format: OutputFormat) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::UserList).await? {
        Response::Users { users } => {
            output::print_many(format, &users, output::user_line);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to user list: {other:?}")),
    }
}

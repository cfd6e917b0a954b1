// SPDX-License-Identifier: MIT

use crate::client::{self, DaemonClient};
use crate::output::{self, OutputFormat};
use chrono::{DateTime, Utc};
use fc_wire::{Request, Response};

pub async fn schedule(
    client: &DaemonClient,
    agent_host: String,
    name: String,
    config: String,
    time: Option<DateTime<Utc>>,
) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client
        .call(
            Some(token),
            Request::JobSchedule { agent_host, name, config, time },
        )
        .await?
    {
        Response::Job { job } => {
            println!("scheduled job {} on {} ({})", job.id, job.agent_host, job.bucket_name);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to job schedule: {other:?}")),
    }
}

pub async fn cancel(client: &DaemonClient, id: i64) -> anyhow::Result<()> {
    let token = client::require_token()?;
    let _ = client.call(Some(token), Request::JobCancel { id }).await?;
    Ok(())
}

pub async fn list(
    client: &DaemonClient,
    agent_host: Option<String>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let token = client::require_token()?;
    match client.call(Some(token), Request::JobList { agent_host }).await? {
        Response::Jobs { jobs } => {
            output::print_many(format, &jobs, output::job_line);
            Ok(())
        }
        other => Err(anyhow::anyhow!("unexpected response to job list: {other:?}")),
    }
}

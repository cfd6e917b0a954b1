// SPDX-License-Identifier: MIT

//! Text and JSON rendering for the summaries the RPC facade returns.
//! Kept deliberately small — this client has no interactive surface to
//! theme, just lines worth piping into other tools.

use clap::ValueEnum;
use fc_wire::{AgentSummary, JobSummary, UserSummary};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_possible_value()
            .expect("OutputFormat has no skipped variants")
            .get_name()
            .fmt(f)
    }
}

pub fn print_one<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce(&T) -> String) {
    match format {
        OutputFormat::Text => println!("{}", text(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value).unwrap_or_default()),
    }
}

pub fn print_many<T: Serialize>(format: OutputFormat, values: &[T], text: impl Fn(&T) -> String) {
    match format {
        OutputFormat::Text => {
            if values.is_empty() {
                println!("(none)");
            }
            for value in values {
                println!("{}", text(value));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values).unwrap_or_default()),
    }
}

pub fn user_line(user: &UserSummary) -> String {
    format!("{}\t{}", user.username, user.auth_type)
}

pub fn agent_line(agent: &AgentSummary) -> String {
    format!(
        "{}\taccepted={}\t{} {} {}/{}\tv{}",
        agent.host,
        agent.accepted,
        agent.os,
        agent.os_version,
        agent.distro,
        agent.distro_version,
        agent.version
    )
}

pub fn job_line(job: &JobSummary) -> String {
    format!(
        "{}\t{}\t{}\t{}\treconn={}\t{}",
        job.id, job.agent_host, job.status, job.time, job.reconn_attempts, job.bucket_name
    )
}

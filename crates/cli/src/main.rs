// SPDX-License-Identifier: MIT

//! `fleetctl`: a thin operator client for `fleetd`'s RPC facade (§6,
//! SPEC_FULL §2 component 12). Every subcommand opens a connection,
//! sends one framed request (or a `*Chunk`/`*End` sequence for binary
//! uploads), and prints the response.

mod client;
mod commands;
mod exit_error;
mod output;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use client::DaemonClient;
use exit_error::ExitError;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fleetctl", version, about = "Operator client for the fleetd disaster-recovery controller")]
struct Cli {
    /// fleetd RPC facade host.
    #[arg(long, global = true, default_value = "127.0.0.1")]
    host: String,

    /// fleetd RPC facade port (`grpc.port` in `fleetd`'s own config).
    #[arg(long, global = true, default_value_t = 7070)]
    port: u16,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and cache the issued bearer token.
    Login { username: String, password: String },
    /// Renew the cached bearer token before it expires.
    Renew,
    #[command(subcommand)]
    User(UserCommand),
    #[command(subcommand)]
    Agent(AgentCommand),
    #[command(subcommand)]
    Job(JobCommand),
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Add { username: String, password: String },
    Delete { username: String },
    List,
}

#[derive(Subcommand, Debug)]
enum AgentCommand {
    Add { host: String },
    Accept { host: String },
    Delete { host: String },
    Get { host: String },
    List,
    /// Join requests awaiting `fleetctl agent accept` (§4.5).
    Requests,
    Install {
        host: String,
        #[arg(long, default_value_t = 22)]
        ssh_port: u16,
        #[arg(long)]
        ssh_user: String,
        #[arg(long)]
        ssh_password: String,
        binary: PathBuf,
    },
    PluginAdd {
        host: String,
        repo: String,
        plugin: String,
        version: String,
        #[arg(long = "arch", value_delimiter = ',')]
        arch: Vec<String>,
        #[arg(long = "os", value_delimiter = ',')]
        os: Vec<String>,
        binary: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum JobCommand {
    Schedule {
        agent_host: String,
        name: String,
        #[arg(long, default_value = "{}")]
        config: String,
        #[arg(long)]
        time: Option<DateTime<Utc>>,
    },
    Cancel { id: i64 },
    List {
        agent_host: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = DaemonClient::new(&cli.host, cli.port);

    if let Err(err) = dispatch(&client, cli.format, cli.command).await {
        match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("fleetctl: {}", exit.message);
                std::process::exit(exit.code);
            }
            None => {
                eprintln!("fleetctl: {err}");
                std::process::exit(1);
            }
        }
    }
}

async fn dispatch(client: &DaemonClient, format: OutputFormat, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => commands::user::login(client, username, password).await,
        Command::Renew => commands::user::renew(client).await,
        Command::User(cmd) => match cmd {
            UserCommand::Add { username, password } => commands::user::add(client, username, password).await,
            UserCommand::Delete { username } => commands::user::delete(client, username).await,
            UserCommand::List => commands::user::list(client, format).await,
        },
        Command::Agent(cmd) => match cmd {
            AgentCommand::Add { host } => commands::agent::add(client, host).await,
            AgentCommand::Accept { host } => commands::agent::accept(client, host).await,
            AgentCommand::Delete { host } => commands::agent::delete(client, host).await,
            AgentCommand::Get { host } => commands::agent::get(client, host, format).await,
            AgentCommand::List => commands::agent::list(client, format).await,
            AgentCommand::Requests => commands::agent::requests(client, format).await,
            AgentCommand::Install { host, ssh_port, ssh_user, ssh_password, binary } => {
                commands::agent::install(client, host, ssh_port, ssh_user, ssh_password, &binary).await
            }
            AgentCommand::PluginAdd { host, repo, plugin, version, arch, os, binary } => {
                commands::agent::plugin_add(client, host, repo, plugin, version, arch, os, &binary).await
            }
        },
        Command::Job(cmd) => match cmd {
            JobCommand::Schedule { agent_host, name, config, time } => {
                commands::job::schedule(client, agent_host, name, config, time).await
            }
            JobCommand::Cancel { id } => commands::job::cancel(client, id).await,
            JobCommand::List { agent_host } => commands::job::list(client, agent_host, format).await,
        },
    }
}

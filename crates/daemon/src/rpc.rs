// SPDX-License-Identifier: MIT

use crate::agent_lifecycle;
use crate::context::Context;
use crate::pool::OutboundFrame;
use async_trait::async_trait;
use fc_core::error::{Error, Result};
use fc_core::job::JobId;
use fc_core::plugin::NewPlugin;
use fc_core::user::{check_password_policy, verify_password, AuthType, NewUser};
use fc_engine::{AddJobInput, AgentTransport};
use fc_wire::{AgentSummary, JobSummary, Request, Response, UserSummary};
use std::sync::Arc;

/// `fc-engine`'s only window onto the agent session fabric (§4.7),
/// implemented over the daemon's `accepted` pool: look the host up,
/// send it the frame, and translate "not in the pool" into the
/// unavailable error kind the worker already knows how to retry on.
pub struct DaemonTransport {
    pub ctx: Arc<Context>,
}

#[async_trait]
impl AgentTransport for DaemonTransport {
    async fn send_job_new(&self, host: &str, frame: fc_wire::JobNew) -> Result<()> {
        let handle = self
            .ctx
            .accepted
            .get(host)
            .ok_or_else(|| Error::unavailable(format!("agent {host} is not connected")))?;
        handle
            .send(OutboundFrame::JobNew(frame))
            .map_err(|_| Error::unavailable(format!("agent {host}'s session has closed")))
    }
}

/// Per-connection accumulator for the `*Chunk`/`*End` call pairs (§4.9):
/// one RPC connection handles at most one binary upload at a time, so a
/// single buffer plus the fields needed to finish the call is enough.
#[derive(Default)]
pub enum PendingUpload {
    #[default]
    None,
    Install {
        host: String,
        ssh_port: u16,
        ssh_user: String,
        ssh_password: String,
        bytes: Vec<u8>,
    },
    Plugin {
        host: String,
        repo: String,
        plugin: String,
        version: String,
        arch: Vec<String>,
        os: Vec<String>,
        bytes: Vec<u8>,
    },
}

/// The unary interceptor (§4.9): every variant except `UserLogin` and
/// `UserTokenRenew` requires a token that still validates. `UserTokenRenew`
/// is itself exempted because its entire point is renewing a token that
/// may already be expired.
fn authorize(ctx: &Context, token: Option<&str>, request: &Request) -> Result<()> {
    if matches!(request, Request::UserLogin { .. } | Request::UserTokenRenew) {
        return Ok(());
    }
    let token = token.ok_or_else(|| Error::unauthenticated("missing bearer token"))?;
    if ctx.tokens.validate(token) {
        Ok(())
    } else {
        Err(Error::invalid_argument("invalid or expired token"))
    }
}

/// Dispatches one RPC call (§4.9), running the unary interceptor first.
/// `upload` persists across calls on the same connection so a `*Chunk`
/// sequence can accumulate bytes before its matching `*End` fires the
/// side effect.
pub async fn handle_request(
    ctx: &Arc<Context>,
    token: Option<&str>,
    upload: &mut PendingUpload,
    request: Request,
) -> Response {
    if let Err(e) = authorize(ctx, token, &request) {
        return Response::from_error(&e);
    }
    match dispatch(ctx, token, upload, request).await {
        Ok(response) => response,
        Err(e) => Response::from_error(&e),
    }
}

async fn dispatch(
    ctx: &Arc<Context>,
    token: Option<&str>,
    upload: &mut PendingUpload,
    request: Request,
) -> Result<Response> {
    match request {
        Request::UserLogin { username, password } => {
            let user = ctx.store.users_find_by_username(&username).await?;
            if !verify_password(&password, &user.password_hash)? {
                return Err(Error::unauthenticated("error logging in: incorrect password"));
            }
            let issued = ctx.tokens.issue(&user.username)?;
            Ok(Response::Token {
                token: issued.token,
                expires_at: issued.expires_at,
            })
        }
        Request::UserTokenRenew => {
            let token = token.ok_or_else(|| Error::unauthenticated("missing bearer token"))?;
            let username = ctx.tokens.subject(token)?;
            let user = ctx.store.users_find_by_username(&username).await?;
            let issued = ctx.tokens.renew(token, user.updated_at)?;
            Ok(Response::Token {
                token: issued.token,
                expires_at: issued.expires_at,
            })
        }
        Request::UserAdd { username, password } => {
            check_password_policy(&password)?;
            let user = ctx
                .store
                .users_insert(
                    NewUser {
                        username,
                        password,
                        auth_type: AuthType::Local,
                    },
                    ctx.config.security.bcrypt_cost,
                )
                .await?;
            Ok(Response::User { user: UserSummary::from(&user) })
        }
        Request::UserDelete { username } => {
            let user = ctx.store.users_find_by_username(&username).await?;
            ctx.store.users_soft_delete(user.id).await?;
            Ok(Response::Ok)
        }
        Request::UserList => {
            let users = ctx.store.users_list().await?;
            Ok(Response::Users {
                users: users.iter().map(UserSummary::from).collect(),
            })
        }

        Request::AgentAdd { host } => {
            let agent = agent_lifecycle::add_agent(ctx.store.as_ref(), &ctx.gateway, host).await?;
            Ok(Response::Agent { agent: AgentSummary::from(&agent) })
        }
        Request::AgentAccept { host } => {
            let agent = agent_lifecycle::accept_agent(
                ctx.store.as_ref(),
                &ctx.gateway,
                &ctx.pending,
                &ctx.accepted,
                host,
            )
            .await?;
            Ok(Response::Agent { agent: AgentSummary::from(&agent) })
        }
        Request::AgentDelete { host } => {
            let agent = ctx.store.agents_find_by_host(&host).await?;
            ctx.store.agents_soft_delete(agent.id).await?;
            Ok(Response::Ok)
        }
        Request::AgentGet { host } => {
            let agent = ctx.store.agents_find_by_host(&host).await?;
            Ok(Response::Agent { agent: AgentSummary::from(&agent) })
        }
        Request::AgentList => {
            let agents = ctx.store.agents_list().await?;
            Ok(Response::Agents {
                agents: agents.iter().map(AgentSummary::from).collect(),
            })
        }
        Request::AgentRequestList => {
            let agents = ctx.store.agents_list_pending().await?;
            Ok(Response::Agents {
                agents: agents.iter().map(AgentSummary::from).collect(),
            })
        }

        Request::AgentInstallChunk {
            host,
            ssh_port,
            ssh_user,
            ssh_password,
            bin_chunk,
        } => {
            match upload {
                PendingUpload::Install { bytes, .. } => bytes.extend_from_slice(&bin_chunk),
                _ => {
                    *upload = PendingUpload::Install {
                        host,
                        ssh_port,
                        ssh_user,
                        ssh_password,
                        bytes: bin_chunk,
                    }
                }
            }
            Ok(Response::Ok)
        }
        Request::AgentInstallEnd => {
            let PendingUpload::Install {
                host,
                ssh_port,
                ssh_user,
                ssh_password,
                bytes,
            } = std::mem::take(upload)
            else {
                return Err(Error::failed_precondition("no install upload in progress"));
            };
            let agent = agent_lifecycle::install_agent(
                ctx.store.as_ref(),
                &ctx.controller_key,
                &ctx.controller_public_key_line,
                &host,
                ssh_port,
                &ssh_user,
                &ssh_password,
                &bytes,
            )
            .await?;
            Ok(Response::Agent { agent: AgentSummary::from(&agent) })
        }

        Request::AgentPluginAddChunk {
            host,
            repo,
            plugin,
            version,
            arch,
            os,
            bin_chunk,
        } => {
            match upload {
                PendingUpload::Plugin { bytes, .. } => bytes.extend_from_slice(&bin_chunk),
                _ => {
                    *upload = PendingUpload::Plugin {
                        host,
                        repo,
                        plugin,
                        version,
                        arch,
                        os,
                        bytes: bin_chunk,
                    }
                }
            }
            Ok(Response::Ok)
        }
        Request::AgentPluginAddEnd => {
            let PendingUpload::Plugin {
                host,
                repo,
                plugin,
                version,
                arch,
                os,
                bytes: _,
            } = std::mem::take(upload)
            else {
                return Err(Error::failed_precondition("no plugin upload in progress"));
            };
            // Where the uploaded bytes land is the agent-side runtime's
            // concern, out of scope per §1 non-goals — only the
            // plugin's identity row is persisted here.
            ctx.store
                .plugins_insert(NewPlugin {
                    repo,
                    name: plugin,
                    version,
                    agent_host: host,
                    arch,
                    os,
                })
                .await?;
            Ok(Response::Ok)
        }

        Request::JobSchedule {
            agent_host,
            name,
            config,
            time,
        } => {
            let job = fc_engine::add_job(
                ctx.store.as_ref(),
                &ctx.gateway,
                &ctx.jobs,
                ctx.clock.as_ref(),
                AddJobInput {
                    agent_host,
                    plugin_identity: name,
                    config,
                    time,
                },
            )
            .await?;
            Ok(Response::Job { job: JobSummary::from(&job) })
        }
        Request::JobCancel { id } => {
            let _ = JobId::from_raw(id);
            Err(Error::unknown("job cancellation is not implemented yet"))
        }
        Request::JobList { agent_host } => {
            let jobs = ctx.store.jobs_list(agent_host.as_deref()).await?;
            Ok(Response::Jobs {
                jobs: jobs.iter().map(JobSummary::from).collect(),
            })
        }
    }
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;

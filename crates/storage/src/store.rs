// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use fc_core::agent::{Agent, AgentId, NewAgent};
use fc_core::error::Result;
use fc_core::job::{Job, JobId, NewJob};
use fc_core::plugin::{Plugin, PluginId, NewPlugin};
use fc_core::user::{NewUser, User, UserId};

/// The relational store's external contract (§4.2): parameterised
/// insert/update/select, soft-delete via a `deleted_at` filter applied to
/// every read. List operations return empty sequences, never an error,
/// when there are no rows; not-found is a distinct recognizable error
/// class (`fc_core::Error::NotFound`).
///
/// Hooks named in §4.2 — generate an agent secret if absent, enforce and
/// then replace a user's plaintext password — are explicit steps inside
/// `users_insert` / `agents_insert`, not a generic callback.
#[async_trait]
pub trait Store: Send + Sync {
    async fn users_insert(&self, new: NewUser, bcrypt_cost: u32) -> Result<User>;
    async fn users_find_by_username(&self, username: &str) -> Result<User>;
    async fn users_list(&self) -> Result<Vec<User>>;
    async fn users_soft_delete(&self, id: UserId) -> Result<()>;

    async fn agents_insert(&self, new: NewAgent) -> Result<Agent>;
    async fn agents_find_by_host(&self, host: &str) -> Result<Agent>;
    async fn agents_find_by_id(&self, id: AgentId) -> Result<Agent>;
    /// All non-deleted agents, accepted or pending.
    async fn agents_list(&self) -> Result<Vec<Agent>>;
    /// Only agents with `accepted=false` — the join-request list (§8
    /// GLOSSARY: "returned only by the request-list query").
    async fn agents_list_pending(&self) -> Result<Vec<Agent>>;
    /// Only agents with `accepted=true`, for `ValidateAgent`'s scan and
    /// for the scheduler/worker's stream lookups.
    async fn agents_list_accepted(&self) -> Result<Vec<Agent>>;
    async fn agents_update(&self, agent: Agent) -> Result<Agent>;
    async fn agents_soft_delete(&self, id: AgentId) -> Result<()>;

    async fn plugins_insert(&self, new: NewPlugin) -> Result<Plugin>;
    async fn plugins_list_by_agent(&self, agent_host: &str) -> Result<Vec<Plugin>>;
    async fn plugins_find_by_identity(&self, agent_host: &str, identity: &str) -> Result<Plugin>;
    /// Looked up by the Worker to build the `JobNew` frame name from the
    /// job's `plugin_id` (§4.7).
    async fn plugins_find_by_id(&self, id: PluginId) -> Result<Plugin>;
    async fn plugins_soft_delete(&self, id: PluginId) -> Result<()>;

    async fn jobs_insert(&self, new: NewJob) -> Result<Job>;
    async fn jobs_find_by_id(&self, id: JobId) -> Result<Job>;
    async fn jobs_list(&self, agent_host: Option<&str>) -> Result<Vec<Job>>;
    /// Every non-deleted job, loaded once at startup into the scheduler's
    /// in-memory slice (§4.7).
    async fn jobs_list_all(&self) -> Result<Vec<Job>>;
    async fn jobs_update(&self, job: Job) -> Result<Job>;
    async fn jobs_soft_delete(&self, id: JobId) -> Result<()>;
}

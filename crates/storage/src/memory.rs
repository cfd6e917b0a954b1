// SPDX-License-Identifier: MIT

use crate::store::Store;
use async_trait::async_trait;
use chrono::Utc;
use fc_core::agent::{Agent, AgentId, NewAgent};
use fc_core::error::{Error, Result};
use fc_core::job::{Job, JobId, NewJob};
use fc_core::plugin::{NewPlugin, Plugin, PluginId};
use fc_core::secret::derive_secret;
use fc_core::user::{check_password_policy, hash_password, NewUser, User, UserId};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    agents: HashMap<i64, Agent>,
    plugins: HashMap<i64, Plugin>,
    jobs: HashMap<i64, Job>,
    next_user_id: i64,
    next_agent_id: i64,
    next_plugin_id: i64,
    next_job_id: i64,
}

/// An in-process reference [`Store`] backed by `parking_lot`-guarded
/// hash maps. This is what `fc-engine`'s scheduler/worker tests and
/// `fc-daemon`'s own test suite run against, the way `oj-adapters`
/// exposes a fake adapter behind its `test-support` feature for its
/// consumers' tests. Not meant for production use — no durability.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn users_insert(&self, new: NewUser, bcrypt_cost: u32) -> Result<User> {
        check_password_policy(&new.password)?;
        let password_hash = hash_password(&new.password, bcrypt_cost)?;
        let mut tables = self.tables.lock();
        if tables
            .users
            .values()
            .any(|u| !u.is_deleted() && u.username == new.username)
        {
            return Err(Error::invalid_argument(format!(
                "username {} already exists",
                new.username
            )));
        }
        tables.next_user_id += 1;
        let id = UserId::from_raw(tables.next_user_id);
        let now = Utc::now();
        let user = User {
            id,
            username: new.username,
            password_hash,
            auth_type: new.auth_type,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.users.insert(id.get(), user.clone());
        Ok(user)
    }

    async fn users_find_by_username(&self, username: &str) -> Result<User> {
        let tables = self.tables.lock();
        tables
            .users
            .values()
            .find(|u| !u.is_deleted() && u.username == username)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("user {username} not found")))
    }

    async fn users_list(&self) -> Result<Vec<User>> {
        let tables = self.tables.lock();
        Ok(tables.users.values().filter(|u| !u.is_deleted()).cloned().collect())
    }

    async fn users_soft_delete(&self, id: UserId) -> Result<()> {
        let mut tables = self.tables.lock();
        let user = tables
            .users
            .get_mut(&id.get())
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))?;
        user.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn agents_insert(&self, mut new: NewAgent) -> Result<Agent> {
        if new.secret.is_empty() {
            new.secret = derive_secret(&new.host)?;
        }
        let mut tables = self.tables.lock();
        if tables
            .agents
            .values()
            .any(|a| !a.is_deleted() && a.host == new.host)
        {
            return Err(Error::invalid_argument(format!(
                "agent host {} already exists",
                new.host
            )));
        }
        tables.next_agent_id += 1;
        let id = AgentId::from_raw(tables.next_agent_id);
        let now = Utc::now();
        let agent = Agent {
            id,
            host: new.host,
            accepted: new.accepted,
            secret: new.secret,
            object_key: new.object_key,
            ssh_port: new.ssh_port,
            ssh_user: new.ssh_user,
            ssh_host_keys: new.ssh_host_keys,
            arch: new.arch,
            os: new.os,
            os_version: new.os_version,
            distro: new.distro,
            distro_version: new.distro_version,
            version: new.version,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.agents.insert(id.get(), agent.clone());
        Ok(agent)
    }

    async fn agents_find_by_host(&self, host: &str) -> Result<Agent> {
        let tables = self.tables.lock();
        tables
            .agents
            .values()
            .find(|a| !a.is_deleted() && a.host == host)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("agent {host} not found")))
    }

    async fn agents_find_by_id(&self, id: AgentId) -> Result<Agent> {
        let tables = self.tables.lock();
        tables
            .agents
            .get(&id.get())
            .filter(|a| !a.is_deleted())
            .cloned()
            .ok_or_else(|| Error::not_found(format!("agent {id} not found")))
    }

    async fn agents_list(&self) -> Result<Vec<Agent>> {
        let tables = self.tables.lock();
        Ok(tables.agents.values().filter(|a| !a.is_deleted()).cloned().collect())
    }

    async fn agents_list_pending(&self) -> Result<Vec<Agent>> {
        let tables = self.tables.lock();
        Ok(tables
            .agents
            .values()
            .filter(|a| !a.is_deleted() && !a.accepted)
            .cloned()
            .collect())
    }

    async fn agents_list_accepted(&self) -> Result<Vec<Agent>> {
        let tables = self.tables.lock();
        Ok(tables
            .agents
            .values()
            .filter(|a| !a.is_deleted() && a.accepted)
            .cloned()
            .collect())
    }

    async fn agents_update(&self, mut agent: Agent) -> Result<Agent> {
        let mut tables = self.tables.lock();
        if !tables.agents.contains_key(&agent.id.get()) {
            return Err(Error::not_found(format!("agent {} not found", agent.id)));
        }
        agent.updated_at = Utc::now();
        tables.agents.insert(agent.id.get(), agent.clone());
        Ok(agent)
    }

    async fn agents_soft_delete(&self, id: AgentId) -> Result<()> {
        let mut tables = self.tables.lock();
        let agent = tables
            .agents
            .get_mut(&id.get())
            .ok_or_else(|| Error::not_found(format!("agent {id} not found")))?;
        agent.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn plugins_insert(&self, new: NewPlugin) -> Result<Plugin> {
        let mut tables = self.tables.lock();
        tables.next_plugin_id += 1;
        let id = PluginId::from_raw(tables.next_plugin_id);
        let now = Utc::now();
        let plugin = Plugin {
            id,
            repo: new.repo,
            name: new.name,
            version: new.version,
            agent_host: new.agent_host,
            arch: new.arch,
            os: new.os,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.plugins.insert(id.get(), plugin.clone());
        Ok(plugin)
    }

    async fn plugins_list_by_agent(&self, agent_host: &str) -> Result<Vec<Plugin>> {
        let tables = self.tables.lock();
        Ok(tables
            .plugins
            .values()
            .filter(|p| !p.is_deleted() && p.agent_host == agent_host)
            .cloned()
            .collect())
    }

    async fn plugins_find_by_identity(&self, agent_host: &str, identity: &str) -> Result<Plugin> {
        let tables = self.tables.lock();
        tables
            .plugins
            .values()
            .find(|p| !p.is_deleted() && p.agent_host == agent_host && p.matches_identity(identity))
            .cloned()
            .ok_or_else(|| Error::not_found(format!("plugin {identity} not found on {agent_host}")))
    }

    async fn plugins_find_by_id(&self, id: PluginId) -> Result<Plugin> {
        let tables = self.tables.lock();
        tables
            .plugins
            .get(&id.get())
            .filter(|p| !p.is_deleted())
            .cloned()
            .ok_or_else(|| Error::not_found(format!("plugin {id} not found")))
    }

    async fn plugins_soft_delete(&self, id: PluginId) -> Result<()> {
        let mut tables = self.tables.lock();
        let plugin = tables
            .plugins
            .get_mut(&id.get())
            .ok_or_else(|| Error::not_found(format!("plugin {id} not found")))?;
        plugin.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn jobs_insert(&self, new: NewJob) -> Result<Job> {
        let mut tables = self.tables.lock();
        tables.next_job_id += 1;
        let id = JobId::from_raw(tables.next_job_id);
        let now = Utc::now();
        let job = Job {
            id,
            plugin_id: new.plugin_id,
            agent_host: new.agent_host,
            status: new.status,
            time: new.time,
            config: new.config,
            bucket_name: new.bucket_name,
            info: new.info,
            reconn_attempts: new.reconn_attempts,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.jobs.insert(id.get(), job.clone());
        Ok(job)
    }

    async fn jobs_find_by_id(&self, id: JobId) -> Result<Job> {
        let tables = self.tables.lock();
        tables
            .jobs
            .get(&id.get())
            .filter(|j| !j.is_deleted())
            .cloned()
            .ok_or_else(|| Error::not_found(format!("job {id} not found")))
    }

    async fn jobs_list(&self, agent_host: Option<&str>) -> Result<Vec<Job>> {
        let tables = self.tables.lock();
        Ok(tables
            .jobs
            .values()
            .filter(|j| !j.is_deleted())
            .filter(|j| match agent_host {
                Some(h) => j.agent_host == h,
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn jobs_list_all(&self) -> Result<Vec<Job>> {
        let tables = self.tables.lock();
        Ok(tables.jobs.values().filter(|j| !j.is_deleted()).cloned().collect())
    }

    async fn jobs_update(&self, mut job: Job) -> Result<Job> {
        let mut tables = self.tables.lock();
        if !tables.jobs.contains_key(&job.id.get()) {
            return Err(Error::not_found(format!("job {} not found", job.id)));
        }
        job.updated_at = Utc::now();
        tables.jobs.insert(job.id.get(), job.clone());
        Ok(job)
    }

    async fn jobs_soft_delete(&self, id: JobId) -> Result<()> {
        let mut tables = self.tables.lock();
        let job = tables
            .jobs
            .get_mut(&id.get())
            .ok_or_else(|| Error::not_found(format!("job {id} not found")))?;
        job.deleted_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

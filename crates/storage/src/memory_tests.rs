use super::*;
use fc_core::agent::NewAgentBuilder;
use fc_core::job::{JobStatus, NewJobBuilder};
use fc_core::plugin::NewPluginBuilder;
use fc_core::user::{AuthType, NewUserBuilder};

fn store() -> MemoryStore {
    MemoryStore::new()
}

#[tokio::test]
async fn user_insert_enforces_password_policy() {
    let store = store();
    let new = NewUserBuilder::default().username("nefix").password("weak").build();
    let err = store.users_insert(new, 4).await.unwrap_err();
    assert!(err.to_string().contains("length of 8 characters"));
}

#[tokio::test]
async fn user_insert_hashes_and_clears_plaintext() {
    let store = store();
    let new = NewUserBuilder::default()
        .username("nefix")
        .password("f0cKt3Rf$")
        .build();
    let user = store.users_insert(new, 4).await.expect("policy satisfied");
    assert_ne!(user.password_hash, "f0cKt3Rf$");
    assert_eq!(user.auth_type, AuthType::Local);

    let found = store.users_find_by_username("nefix").await.expect("exists");
    assert_eq!(found.id, user.id);
}

#[tokio::test]
async fn user_not_found_is_distinct_error() {
    let store = store();
    let err = store.users_find_by_username("ghost").await.unwrap_err();
    assert_eq!(err.kind(), fc_core::error::ErrorKind::NotFound);
}

#[tokio::test]
async fn agent_insert_generates_secret_when_absent() {
    let store = store();
    let new = NewAgentBuilder::default().host("laptop").build();
    assert!(new.secret.is_empty());
    let agent = store.agents_insert(new).await.expect("inserts");
    assert!(!agent.secret.is_empty());
}

#[tokio::test]
async fn agent_insert_keeps_explicit_secret() {
    let store = store();
    let new = NewAgentBuilder::default().host("laptop").secret("given").build();
    let agent = store.agents_insert(new).await.expect("inserts");
    assert_eq!(agent.secret, "given");
}

#[tokio::test]
async fn pending_and_accepted_lists_partition_agents() {
    let store = store();
    store
        .agents_insert(NewAgentBuilder::default().host("pending-host").build())
        .await
        .expect("inserts");
    store
        .agents_insert(
            NewAgentBuilder::default()
                .host("accepted-host")
                .accepted(true)
                .secret("s3cr3t")
                .build(),
        )
        .await
        .expect("inserts");

    let pending = store.agents_list_pending().await.expect("lists");
    let accepted = store.agents_list_accepted().await.expect("lists");
    assert_eq!(pending.len(), 1);
    assert_eq!(accepted.len(), 1);
    assert_eq!(pending[0].host, "pending-host");
    assert_eq!(accepted[0].host, "accepted-host");
}

#[tokio::test]
async fn soft_deleted_agent_excluded_from_reads() {
    let store = store();
    let agent = store
        .agents_insert(NewAgentBuilder::default().host("laptop").build())
        .await
        .expect("inserts");
    store.agents_soft_delete(agent.id).await.expect("deletes");
    let err = store.agents_find_by_host("laptop").await.unwrap_err();
    assert_eq!(err.kind(), fc_core::error::ErrorKind::NotFound);
    assert!(store.agents_list().await.expect("lists").is_empty());
}

#[tokio::test]
async fn plugin_lookup_by_identity() {
    let store = store();
    store
        .plugins_insert(
            NewPluginBuilder::default()
                .repo("default")
                .name("tar")
                .agent_host("laptop")
                .build(),
        )
        .await
        .expect("inserts");

    let found = store
        .plugins_find_by_identity("laptop", "default/tar")
        .await
        .expect("found");
    assert_eq!(found.version, "v1.0.0");

    let err = store
        .plugins_find_by_identity("laptop", "default/zip")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), fc_core::error::ErrorKind::NotFound);
}

#[tokio::test]
async fn plugin_lookup_by_id_matches_the_row_returned_on_insert() {
    let store = store();
    let plugin = store
        .plugins_insert(
            NewPluginBuilder::default()
                .repo("default")
                .name("tar")
                .agent_host("laptop")
                .build(),
        )
        .await
        .expect("inserts");

    let found = store.plugins_find_by_id(plugin.id).await.expect("found");
    assert_eq!(found.id, plugin.id);

    let err = store
        .plugins_find_by_id(fc_core::PluginId::from_raw(9999))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), fc_core::error::ErrorKind::NotFound);
}

#[tokio::test]
async fn jobs_list_filters_by_agent_host() {
    let store = store();
    store
        .jobs_insert(NewJobBuilder::default().agent_host("laptop").build())
        .await
        .expect("inserts");
    store
        .jobs_insert(NewJobBuilder::default().agent_host("server").build())
        .await
        .expect("inserts");

    let laptop_jobs = store.jobs_list(Some("laptop")).await.expect("lists");
    assert_eq!(laptop_jobs.len(), 1);
    let all_jobs = store.jobs_list(None).await.expect("lists");
    assert_eq!(all_jobs.len(), 2);
}

#[tokio::test]
async fn jobs_update_persists_status_transition() {
    let store = store();
    let job = store
        .jobs_insert(NewJobBuilder::default().build())
        .await
        .expect("inserts");
    let mut updated = job.clone();
    updated.status = JobStatus::Running;
    let saved = store.jobs_update(updated).await.expect("updates");
    assert_eq!(saved.status, JobStatus::Running);

    let reloaded = store.jobs_find_by_id(job.id).await.expect("reloads");
    assert_eq!(reloaded.status, JobStatus::Running);
}

#[tokio::test]
async fn duplicate_username_rejected() {
    let store = store();
    let first = NewUserBuilder::default().username("nefix").password("f0cKt3Rf$").build();
    store.users_insert(first, 4).await.expect("first succeeds");
    let second = NewUserBuilder::default().username("nefix").password("An0ther1").build();
    let err = store.users_insert(second, 4).await.unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

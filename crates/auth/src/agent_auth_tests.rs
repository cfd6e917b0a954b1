use super::*;
use chrono::Utc;
use fc_core::agent::AgentId;

fn agent(host: &str, secret: &str, accepted: bool) -> Agent {
    Agent {
        id: AgentId::from_raw(1),
        host: host.to_string(),
        accepted,
        secret: secret.to_string(),
        object_key: String::new(),
        ssh_port: 22,
        ssh_user: "drlm".to_string(),
        ssh_host_keys: Vec::new(),
        arch: "amd64".to_string(),
        os: "linux".to_string(),
        os_version: String::new(),
        distro: "debian".to_string(),
        distro_version: String::new(),
        version: String::new(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

#[test]
fn finds_matching_agent_by_secret() {
    let agents = vec![
        agent("server", "supersecret", true),
        agent("laptop", "secret", true),
    ];
    assert_eq!(validate_agent("secret", &agents), Some("laptop"));
}

#[test]
fn unknown_secret_does_not_match() {
    let agents = vec![
        agent("server", "supersecret", true),
        agent("laptop", "secret", true),
    ];
    assert_eq!(validate_agent("h4ck3r", &agents), None);
}

#[test]
fn pending_agent_never_matches_even_with_a_secret() {
    let agents = vec![agent("pending-host", "leaked", false)];
    assert_eq!(validate_agent("leaked", &agents), None);
}

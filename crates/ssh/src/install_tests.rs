use super::*;

#[test]
fn renders_toml_shaped_config_with_credentials() {
    let credentials = AgentCredentials {
        agent_secret: "abc123".to_string(),
        object_access_key: "drlm-agent-1".to_string(),
        object_secret_key: "def456".to_string(),
    };
    let rendered = render_agent_config(&credentials);
    assert!(rendered.contains("secret = \"abc123\""));
    assert!(rendered.contains("object_access_key = \"drlm-agent-1\""));
    assert!(rendered.contains("object_secret_key = \"def456\""));
}

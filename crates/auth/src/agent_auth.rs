// SPDX-License-Identifier: MIT

use fc_core::agent::Agent;

/// `ValidateAgent(secret) → (host, ok)`: a linear scan over accepted
/// agents, matching by `secret` equality. `O(n)` per frame, explicitly
/// sanctioned at expected fleet sizes (§9 design note) — a secret-keyed
/// index is a valid optimisation if `n` grows large, but is not required
/// here.
///
/// Callers pass only the accepted agents (the pending pool's hosts have
/// no bearer credential yet); a non-accepted agent never matches even if
/// its `secret` column happens to be populated.
pub fn validate_agent<'a>(
    secret: &str,
    accepted_agents: impl IntoIterator<Item = &'a Agent>,
) -> Option<&'a str> {
    accepted_agents
        .into_iter()
        .find(|agent| agent.accepted && agent.secret == secret)
        .map(|agent| agent.host.as_str())
}

#[cfg(test)]
#[path = "agent_auth_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT

//! Bearer token issuance/validation/renewal and agent shared-secret
//! validation. Stateless aside from the signing secret — all persisted
//! facts needed for a decision (a user's `updated_at`, the list of
//! accepted agents) are supplied by the caller.

mod agent_auth;
mod token;

pub use agent_auth::validate_agent;
pub use token::{IssuedToken, TokenClaims, TokenService, MIN_SECRET_LEN};

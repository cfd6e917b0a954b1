// SPDX-License-Identifier: MIT

use crate::error::{Error, Result};
use crate::define_int_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_int_id! {
    /// A `User` row's store-assigned primary key.
    pub struct UserId;
}

/// How a `User` authenticates. `Local` is the only variant this
/// workspace issues tokens for; the enum stays open for a future
/// external-identity variant the way the original's `auth/types` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthType {
    Local,
}

crate::simple_display!(AuthType {
    Local => "local",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub auth_type: AuthType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Checks the password policy spec §3 names: minimum length 8, at least
/// one uppercase letter, at least one digit. Violations return the exact
/// message boundary scenario 3 expects, verbatim, so the RPC caller can
/// display it.
pub fn check_password_policy(plaintext: &str) -> Result<()> {
    if plaintext.len() < 8 {
        return Err(Error::invalid_argument(
            "the password requires, at least, a length of 8 characters",
        ));
    }
    if !plaintext.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(Error::invalid_argument(
            "the password requires, at least, one uppercase character",
        ));
    }
    if !plaintext.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::invalid_argument(
            "the password requires, at least, one digit",
        ));
    }
    Ok(())
}

/// Hash a password that has already passed [`check_password_policy`],
/// using the configured adaptive-hash cost.
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String> {
    bcrypt::hash(plaintext, cost).map_err(|e| Error::unknown(e.to_string()))
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(plaintext, hash).map_err(|e| Error::unknown(e.to_string()))
}

/// Input to [`crate::user`]-insertion: plaintext password, checked
/// against policy and hashed before the row is ever persisted.
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub auth_type: AuthType,
}

crate::builder!(
    pub struct NewUserBuilder => NewUser {
        into {
            username: String = "nefix",
            password: String = "",
        }
        set {
            auth_type: AuthType = AuthType::Local,
        }
    }
);

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;

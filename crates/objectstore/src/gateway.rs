// SPDX-License-Identifier: MIT

use crate::policy::canned_bucket_policy;
use crate::traits::{ObjectStore, ObjectStoreAdmin};
use fc_core::error::Result;
use fc_core::secret::derive_secret;
use nanoid::nanoid;

const RANDOM_SUFFIX_LEN: usize = 20;
const RANDOM_SUFFIX_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Orchestrates the object-store gateway operations of §4.3 over an
/// [`ObjectStore`] + [`ObjectStoreAdmin`] pair. Errors from either
/// collaborator are surfaced verbatim with context; no partial state is
/// undone on failure (§4.3 — operators repair manually).
pub struct ObjectStoreGateway<S, A> {
    store: S,
    admin: A,
}

impl<S: ObjectStore, A: ObjectStoreAdmin> ObjectStoreGateway<S, A> {
    pub fn new(store: S, admin: A) -> Self {
        Self { store, admin }
    }

    /// `CreateUser`: derive a deterministic secret from `id`, ask the
    /// admin API to create a user named `id` with it, and return the
    /// secret so the caller can persist it on the owning row.
    pub async fn create_user(&self, id: &str) -> Result<String> {
        let secret = derive_secret(id)?;
        self.admin.create_user(id, &secret).await?;
        Ok(secret)
    }

    /// `MakeBucketForUser(user, name?)`: create a bucket (generating
    /// `drlm-<random20>` if no name is given), install the canned policy,
    /// and bind it to `user`. Returns the bucket name actually used.
    pub async fn make_bucket_for_user(&self, user: &str, name: Option<String>) -> Result<String> {
        let bucket = name.unwrap_or_else(random_bucket_name);
        self.store.create_bucket(&bucket).await?;
        let policy_name = format!("{bucket}-policy");
        self.admin
            .set_user_policy(user, &policy_name, canned_bucket_policy(&bucket))
            .await?;
        Ok(bucket)
    }
}

fn random_bucket_name() -> String {
    format!("drlm-{}", nanoid!(RANDOM_SUFFIX_LEN, &RANDOM_SUFFIX_ALPHABET))
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;

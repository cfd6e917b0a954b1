// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use fc_core::error::Result;

/// Bucket/object operations an S3-compatible client provides (§1: "the
/// object store ... consumed as ... an S3 client for bucket creation and
/// object upload").
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn create_bucket(&self, name: &str) -> Result<()>;
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<()>;
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
}

/// User/policy administration has no AWS S3 equivalent, so it is modeled
/// as its own trait (§4.3) — a different backend's admin surface can be
/// swapped in without touching [`ObjectStore`].
#[async_trait]
pub trait ObjectStoreAdmin: Send + Sync {
    async fn create_user(&self, username: &str, secret: &str) -> Result<()>;
    async fn set_user_policy(
        &self,
        username: &str,
        policy_name: &str,
        policy_json: serde_json::Value,
    ) -> Result<()>;
}

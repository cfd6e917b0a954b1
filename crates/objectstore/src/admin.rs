// SPDX-License-Identifier: MIT

use crate::traits::ObjectStoreAdmin;
use async_trait::async_trait;
use fc_core::error::{Error, Result};
use reqwest::Client;
use serde_json::json;

/// A minimal client for the object store's admin-only surface: creating
/// users and binding policies to them. AWS S3 itself has no such concept
/// (IAM users are account-level, not bucket-store-level), so this talks
/// to a MinIO-shaped admin API over plain HTTP(S) rather than the S3
/// protocol (§4.3).
pub struct MinioAdmin {
    http: Client,
    base_url: String,
    access_key: String,
    secret_key: String,
}

impl MinioAdmin {
    pub fn new(http: Client, base_url: impl Into<String>, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

#[async_trait]
impl ObjectStoreAdmin for MinioAdmin {
    async fn create_user(&self, username: &str, secret: &str) -> Result<()> {
        let url = format!("{}/minio/admin/v3/add-user?accessKey={username}", self.base_url);
        let response = self
            .http
            .put(url)
            .basic_auth(&self.access_key, Some(&self.secret_key))
            .json(&json!({ "secretKey": secret, "status": "enabled" }))
            .send()
            .await
            .map_err(|e| Error::unknown(format!("create_user {username}: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::unknown(format!(
                "create_user {username}: admin API returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn set_user_policy(
        &self,
        username: &str,
        policy_name: &str,
        policy_json: serde_json::Value,
    ) -> Result<()> {
        let define_url = format!("{}/minio/admin/v3/add-canned-policy?name={policy_name}", self.base_url);
        let response = self
            .http
            .put(define_url)
            .basic_auth(&self.access_key, Some(&self.secret_key))
            .json(&policy_json)
            .send()
            .await
            .map_err(|e| Error::unknown(format!("define_policy {policy_name}: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::unknown(format!(
                "define_policy {policy_name}: admin API returned {}",
                response.status()
            )));
        }

        let bind_url = format!(
            "{}/minio/admin/v3/set-user-or-group-policy?policyName={policy_name}&userOrGroup={username}&isGroup=false",
            self.base_url
        );
        let response = self
            .http
            .put(bind_url)
            .basic_auth(&self.access_key, Some(&self.secret_key))
            .send()
            .await
            .map_err(|e| Error::unknown(format!("bind_policy {policy_name}->{username}: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::unknown(format!(
                "bind_policy {policy_name}->{username}: admin API returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

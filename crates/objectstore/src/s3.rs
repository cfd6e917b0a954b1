// SPDX-License-Identifier: MIT

use crate::traits::ObjectStore;
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use fc_core::error::{Error, Result};

/// The S3-compatible bucket/object client (§1, §4.3). Construction is
/// left to the caller (`aws_config::from_env()` plus a custom endpoint
/// for a MinIO deployment) since region/credentials/endpoint come from
/// `fc-daemon`'s config, not this crate.
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn create_bucket(&self, name: &str) -> Result<()> {
        self.client
            .create_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| Error::unknown(format!("create_bucket {name}: {e}")))?;
        Ok(())
    }

    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| Error::unknown(format!("put_object {bucket}/{key}: {e}")))?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::unknown(format!("get_object {bucket}/{key}: {e}")))?;
        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| Error::unknown(format!("reading {bucket}/{key}: {e}")))?;
        Ok(bytes.into_bytes().to_vec())
    }
}

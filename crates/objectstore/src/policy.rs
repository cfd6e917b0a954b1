// SPDX-License-Identifier: MIT

use serde_json::{json, Value};

/// The canned bucket policy installed by `MakeBucketForUser`: list/location
/// on the bucket, get/put/delete/multipart on its objects, open to all
/// principals. A direct port of the policy embedded in
/// `minio/users.go`'s `MakeBucketForUser`.
pub fn canned_bucket_policy(bucket: &str) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Principal": { "AWS": ["*"] },
                "Action": [
                    "s3:ListBucket",
                    "s3:GetBucketLocation"
                ],
                "Resource": [format!("arn:aws:s3:::{bucket}")]
            },
            {
                "Effect": "Allow",
                "Principal": { "AWS": ["*"] },
                "Action": [
                    "s3:GetObject",
                    "s3:PutObject",
                    "s3:DeleteObject",
                    "s3:ListMultipartUploadParts",
                    "s3:AbortMultipartUpload"
                ],
                "Resource": [format!("arn:aws:s3:::{bucket}/*")]
            }
        ]
    })
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;

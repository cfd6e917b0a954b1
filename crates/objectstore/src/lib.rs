// SPDX-License-Identifier: MIT

//! Object-store gateway (§4.3): bucket/object operations via an
//! S3-compatible client, user/policy administration via a separate admin
//! surface, and the `CreateUser`/`MakeBucketForUser` orchestration spec
//! names.

mod admin;
mod gateway;
mod policy;
mod s3;
mod traits;

pub use admin::MinioAdmin;
pub use gateway::ObjectStoreGateway;
pub use policy::canned_bucket_policy;
pub use s3::S3ObjectStore;
pub use traits::{ObjectStore, ObjectStoreAdmin};

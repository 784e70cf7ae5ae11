/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Queryable Amazon S3 bucket configuration for compliance checks.
//!
//! Each resource wraps a single bucket and exposes its configuration (ACL, policy,
//! lifecycle, CORS, tagging, versioning, default encryption and access logging) as
//! plain values and boolean predicates that assertions can be written against.
//! Every accessor maps onto exactly one S3 API call and the result is cached for
//! the lifetime of the resource.
//!
//! # Examples
//!
//! Check that a bucket is not publicly accessible:
//!
//! ```no_run
//! # async fn example() -> Result<(), aws_s3_bucket_inspector::error::Error> {
//! let config = aws_s3_bucket_inspector::from_env().load().await;
//! let client = aws_s3_bucket_inspector::Client::new(config);
//!
//! let bucket = client.s3_bucket().bucket_name("my-bucket").load().await?;
//!
//! assert!(bucket.exists());
//! assert!(!bucket.is_public().await?);
//! assert!(bucket.has_default_encryption_enabled().await?);
//! # Ok(())
//! # }
//! ```
//!
//! See the documentation for each resource for the full list of checks:
//!
//! * [`S3Bucket`](crate::resource::s3_bucket::S3Bucket) - full bucket configuration
//! * [`BucketExistence`](crate::resource::bucket_existence::BucketExistence) - existence only

/// Error types emitted by `aws-s3-bucket-inspector`
pub mod error;

/// Common types used by `aws-s3-bucket-inspector`
pub mod types;

/// Bucket policy documents
pub mod policy;

/// Backends that talk to S3
pub mod backend;

/// Inspector client
pub mod client;

/// Bucket resources
pub mod resource;

/// Inspector configuration
pub mod config;

pub use self::client::Client;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader
pub fn from_env() -> ConfigLoader {
    ConfigLoader::default()
}

/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::backend::{BucketBackend, S3Backend};
use crate::resource::bucket_existence::BucketExistence;
use crate::resource::s3_bucket::builders::S3BucketFluentBuilder;
use crate::Config;

/// Bucket inspection client for Amazon Simple Storage Service.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out inspections
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) backend: Arc<dyn BucketBackend>,
}

impl Client {
    /// Creates a new client from an inspector config.
    pub fn new(config: Config) -> Client {
        Client::from_backend(S3Backend::new(config.client().clone()))
    }

    /// Creates a new client that sends every request through the given backend.
    ///
    /// This is the seam used to substitute a test double for the live S3 backend.
    pub fn from_backend(backend: impl BucketBackend + 'static) -> Client {
        let handle = Arc::new(Handle {
            backend: Arc::new(backend),
        });
        Client { handle }
    }

    /// Inspect the configuration of a single bucket.
    ///
    /// Constructs a fluent builder for an
    /// [`S3Bucket`](crate::resource::s3_bucket::S3Bucket) resource.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aws_s3_bucket_inspector::error::Error;
    ///
    /// async fn versioned(client: &aws_s3_bucket_inspector::Client) -> Result<bool, Error> {
    ///     let bucket = client
    ///         .s3_bucket()
    ///         .bucket_name("my-bucket")
    ///         .load()
    ///         .await?;
    ///
    ///     bucket.is_versioned().await
    /// }
    /// ```
    pub fn s3_bucket(&self) -> S3BucketFluentBuilder {
        S3BucketFluentBuilder::new(self.handle.clone())
    }

    /// Check whether a bucket exists, given raw resource parameters containing `bucket_name`.
    ///
    /// Parameters are not validated until [`BucketExistence::exists`] is called.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aws_s3_bucket_inspector::error::Error;
    ///
    /// async fn exists(client: &aws_s3_bucket_inspector::Client) -> Result<bool, Error> {
    ///     let params = serde_json::json!({ "bucket_name": "my-bucket" });
    ///     client.bucket_existence(params).exists().await
    /// }
    /// ```
    pub fn bucket_existence(&self, params: serde_json::Value) -> BucketExistence {
        BucketExistence::new(params, self.handle.backend.clone())
    }
}

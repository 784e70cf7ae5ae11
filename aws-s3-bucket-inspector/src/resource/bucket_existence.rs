/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::backend::{BucketBackend, Fetched};
use crate::error::{self, Error};
use crate::resource::BUCKET_NAME_PARAM;

/// Existence check for a bucket, typically on an S3-compatible object storage service.
///
/// Created with [`Client::bucket_existence`](crate::Client::bucket_existence). Unlike
/// [`S3Bucket`](crate::resource::s3_bucket::S3Bucket) nothing is cached: every call to
/// [`exists`](Self::exists) sends a new location lookup.
#[derive(Debug, Clone)]
pub struct BucketExistence {
    params: Value,
    backend: Arc<dyn BucketBackend>,
}

impl BucketExistence {
    pub(crate) fn new(params: Value, backend: Arc<dyn BucketBackend>) -> Self {
        Self { params, backend }
    }

    /// The `bucket_name` parameter, if one was given as a string.
    pub fn bucket_name(&self) -> Option<&str> {
        self.params.get(BUCKET_NAME_PARAM).and_then(Value::as_str)
    }

    /// Look up the bucket's location; `false` only when S3 reports that the bucket does not
    /// exist.
    pub async fn exists(&self) -> Result<bool, Error> {
        let bucket_name = self.bucket_name().ok_or_else(|| {
            error::invalid_input(format!("a string `{BUCKET_NAME_PARAM}` parameter is required"))
        })?;

        match self.backend.get_bucket_location(bucket_name).await {
            Fetched::Found(_) => Ok(true),
            Fetched::Absent => {
                tracing::debug!("bucket {bucket_name} does not exist");
                Ok(false)
            }
            Fetched::Fault(err) => Err(err),
        }
    }
}

impl fmt::Display for BucketExistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Object Storage Bucket {}",
            self.bucket_name().unwrap_or_default()
        )
    }
}

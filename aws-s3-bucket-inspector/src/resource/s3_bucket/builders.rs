/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;

use crate::error;

use super::{S3Bucket, S3BucketInput, S3BucketInputBuilder};

/// Fluent builder for constructing an [`S3Bucket`] resource
#[derive(Debug)]
pub struct S3BucketFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: S3BucketInputBuilder,
    params: Option<serde_json::Value>,
}

impl S3BucketFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
            params: None,
        }
    }

    /// Validate the parameters and check whether the bucket exists.
    ///
    /// Invalid parameters fail before any request is sent. A bucket that does not exist is not
    /// an error, see [`S3Bucket::exists`].
    pub async fn load(self) -> Result<S3Bucket, error::Error> {
        let input = match self.params {
            Some(params) => S3BucketInput::from_params(&params)?,
            None => self.inner.build()?,
        };
        S3Bucket::load(input, self.handle.backend.clone()).await
    }

    /// Set the name of the bucket to inspect.
    pub fn bucket_name(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.bucket_name(input);
        self
    }

    /// Set the name of the bucket to inspect.
    pub fn set_bucket_name(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_bucket_name(input);
        self
    }

    /// The name of the bucket to inspect.
    pub fn get_bucket_name(&self) -> &Option<String> {
        self.inner.get_bucket_name()
    }

    /// Use raw resource parameters instead of the typed setters.
    ///
    /// See [`S3BucketInput::from_params`] for the accepted shapes. When set, these take
    /// precedence over [`bucket_name`](Self::bucket_name).
    pub fn params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }
}

/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;

use crate::error;

pub(crate) mod loader;

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    client: aws_sdk_s3::client::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The Amazon S3 client instance that will be used to send requests to S3.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Set an explicit S3 client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set an explicit S3 client to use.
    pub fn set_client(mut self, client: Option<aws_sdk_s3::Client>) -> Self {
        self.client = client;
        self
    }

    /// Consumes the builder and constructs a [`Config`]
    ///
    /// Fails if no S3 client was set.
    pub fn build(self) -> Result<Config, error::Error> {
        let client = self.client.ok_or_else(|| {
            BuildError::missing_field("client", "an S3 client is required to inspect buckets")
        })?;
        Ok(Config { client })
    }
}

#[cfg(test)]
mod test {
    use crate::error::ErrorKind;

    #[test]
    fn test_build_requires_client() {
        let err = crate::Config::builder().build().unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }
}

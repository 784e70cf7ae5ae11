/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::Region;
use aws_types::SdkConfig;

use crate::config::Builder;
use crate::Config;

/// Load inspector [`Config`] from the environment.
#[derive(Default, Debug)]
pub struct ConfigLoader {
    builder: Builder,
    region: Option<Region>,
    profile_name: Option<String>,
    endpoint_url: Option<String>,
}

impl ConfigLoader {
    /// Override the region requests are sent to.
    ///
    /// Default is the region resolved from the environment.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(Region::new(region.into()));
        self
    }

    /// Use the named profile from the shared AWS config and credentials files.
    pub fn profile_name(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    /// Send requests to a custom endpoint, e.g. an S3-compatible object storage service.
    ///
    /// Path style addressing is used when a custom endpoint is set.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Use an explicit S3 client instead of loading one from the environment.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.builder = self.builder.client(client);
        self
    }

    /// Load the default configuration
    ///
    /// If fields have been overridden during builder construction, the override values will be
    /// used. Otherwise, the default values for each field will be provided.
    pub async fn load(self) -> Config {
        let client = match self.builder.client {
            Some(client) => client,
            None => {
                let mut loader = aws_config::from_env();
                if let Some(region) = self.region {
                    loader = loader.region(region);
                }
                if let Some(profile_name) = self.profile_name {
                    loader = loader.profile_name(profile_name);
                }
                let shared_config = loader.load().await;
                s3_client(&shared_config, self.endpoint_url)
            }
        };

        Config { client }
    }
}

fn s3_client(shared_config: &SdkConfig, endpoint_url: Option<String>) -> aws_sdk_s3::Client {
    let mut s3_config = aws_sdk_s3::config::Builder::from(shared_config);
    if let Some(endpoint_url) = endpoint_url {
        tracing::debug!("using custom S3 endpoint {endpoint_url}");
        s3_config = s3_config.endpoint_url(endpoint_url).force_path_style(true);
    }
    aws_sdk_s3::Client::from_conf(s3_config.build())
}

/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_bucket_acl::GetBucketAclOutput;
use aws_sdk_s3::operation::get_bucket_cors::GetBucketCorsOutput;
use aws_sdk_s3::operation::get_bucket_encryption::GetBucketEncryptionOutput;
use aws_sdk_s3::operation::get_bucket_lifecycle_configuration::GetBucketLifecycleConfigurationOutput;
use aws_sdk_s3::operation::get_bucket_location::GetBucketLocationOutput;
use aws_sdk_s3::operation::get_bucket_logging::GetBucketLoggingOutput;
use aws_sdk_s3::operation::get_bucket_policy::GetBucketPolicyOutput;
use aws_sdk_s3::operation::get_bucket_tagging::GetBucketTaggingOutput;
use aws_sdk_s3::operation::get_bucket_versioning::GetBucketVersioningOutput;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_types::error::display::DisplayErrorContext;
use tracing::Instrument;

use crate::error::{self, NO_SUCH_BUCKET};

/// S3 error codes that mean a sub-resource is simply not configured.
pub(crate) mod absent {
    pub(crate) const NO_SUCH_BUCKET_POLICY: &str = "NoSuchBucketPolicy";
    pub(crate) const NO_SUCH_LIFECYCLE_CONFIGURATION: &str = "NoSuchLifecycleConfiguration";
    pub(crate) const NO_SUCH_CORS_CONFIGURATION: &str = "NoSuchCORSConfiguration";
    pub(crate) const NO_SUCH_TAG_SET: &str = "NoSuchTagSet";
    pub(crate) const NO_ENCRYPTION_CONFIGURATION: &str =
        "ServerSideEncryptionConfigurationNotFoundError";
}

/// Outcome of a single backend request.
#[derive(Debug)]
pub enum Fetched<T> {
    /// The service returned a response
    Found(T),

    /// The service reported the specific "does not exist / not configured" fault for the request
    Absent,

    /// Any other fault
    Fault(error::Error),
}

impl<T> Fetched<T> {
    /// Classify an SDK result, treating the given error codes as [`Fetched::Absent`].
    pub fn classify<E>(result: Result<T, SdkError<E, HttpResponse>>, absent_codes: &[&str]) -> Self
    where
        E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    {
        match result {
            Ok(output) => Fetched::Found(output),
            Err(err) => match err.code() {
                Some(code) if absent_codes.contains(&code) => {
                    tracing::debug!("request reported absence: {code}");
                    Fetched::Absent
                }
                _ => {
                    tracing::debug!("request failed: {}", DisplayErrorContext(&err));
                    Fetched::Fault(err.into())
                }
            },
        }
    }

    /// Convert into a `Result`, mapping [`Fetched::Absent`] to `None`.
    pub fn into_result(self) -> Result<Option<T>, error::Error> {
        match self {
            Fetched::Found(output) => Ok(Some(output)),
            Fetched::Absent => Ok(None),
            Fetched::Fault(err) => Err(err),
        }
    }
}

/// The S3 operations the bucket resources are built on.
///
/// Each method takes the bucket name, forwards it unchanged to a single S3 API call and
/// returns the unchanged response. Implement this trait to substitute a test double.
#[async_trait]
pub trait BucketBackend: fmt::Debug + Send + Sync {
    /// `GetBucketLocation`; absent when the bucket does not exist.
    async fn get_bucket_location(&self, bucket: &str) -> Fetched<GetBucketLocationOutput>;

    /// `GetBucketAcl`; never absent.
    async fn get_bucket_acl(&self, bucket: &str) -> Fetched<GetBucketAclOutput>;

    /// `GetBucketPolicy`; absent when no policy is attached.
    async fn get_bucket_policy(&self, bucket: &str) -> Fetched<GetBucketPolicyOutput>;

    /// `GetBucketLogging`; never absent.
    async fn get_bucket_logging(&self, bucket: &str) -> Fetched<GetBucketLoggingOutput>;

    /// `GetBucketEncryption`; absent when no default encryption is configured.
    async fn get_bucket_encryption(&self, bucket: &str) -> Fetched<GetBucketEncryptionOutput>;

    /// `GetBucketLifecycleConfiguration`; absent when no lifecycle rules are configured.
    async fn get_bucket_lifecycle(
        &self,
        bucket: &str,
    ) -> Fetched<GetBucketLifecycleConfigurationOutput>;

    /// `GetBucketVersioning`; never absent.
    async fn get_bucket_versioning(&self, bucket: &str) -> Fetched<GetBucketVersioningOutput>;

    /// `GetBucketCors`; absent when no CORS rules are configured.
    async fn get_bucket_cors(&self, bucket: &str) -> Fetched<GetBucketCorsOutput>;

    /// `GetBucketTagging`; absent when the bucket has no tags.
    async fn get_bucket_tagging(&self, bucket: &str) -> Fetched<GetBucketTaggingOutput>;
}

/// [`BucketBackend`] that sends requests with an Amazon S3 client.
#[derive(Debug, Clone)]
pub struct S3Backend {
    client: aws_sdk_s3::Client,
}

impl S3Backend {
    /// Creates a new backend using the given S3 client.
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// The S3 client requests are sent with.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

#[async_trait]
impl BucketBackend for S3Backend {
    async fn get_bucket_location(&self, bucket: &str) -> Fetched<GetBucketLocationOutput> {
        let result = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-location", bucket))
            .await;
        Fetched::classify(result, &[NO_SUCH_BUCKET])
    }

    async fn get_bucket_acl(&self, bucket: &str) -> Fetched<GetBucketAclOutput> {
        let result = self
            .client
            .get_bucket_acl()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-acl", bucket))
            .await;
        Fetched::classify(result, &[])
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Fetched<GetBucketPolicyOutput> {
        let result = self
            .client
            .get_bucket_policy()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-policy", bucket))
            .await;
        Fetched::classify(result, &[absent::NO_SUCH_BUCKET_POLICY])
    }

    async fn get_bucket_logging(&self, bucket: &str) -> Fetched<GetBucketLoggingOutput> {
        let result = self
            .client
            .get_bucket_logging()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-logging", bucket))
            .await;
        Fetched::classify(result, &[])
    }

    async fn get_bucket_encryption(&self, bucket: &str) -> Fetched<GetBucketEncryptionOutput> {
        let result = self
            .client
            .get_bucket_encryption()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-encryption", bucket))
            .await;
        Fetched::classify(result, &[absent::NO_ENCRYPTION_CONFIGURATION])
    }

    async fn get_bucket_lifecycle(
        &self,
        bucket: &str,
    ) -> Fetched<GetBucketLifecycleConfigurationOutput> {
        let result = self
            .client
            .get_bucket_lifecycle_configuration()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-lifecycle", bucket))
            .await;
        Fetched::classify(result, &[absent::NO_SUCH_LIFECYCLE_CONFIGURATION])
    }

    async fn get_bucket_versioning(&self, bucket: &str) -> Fetched<GetBucketVersioningOutput> {
        let result = self
            .client
            .get_bucket_versioning()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-versioning", bucket))
            .await;
        Fetched::classify(result, &[])
    }

    async fn get_bucket_cors(&self, bucket: &str) -> Fetched<GetBucketCorsOutput> {
        let result = self
            .client
            .get_bucket_cors()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-cors", bucket))
            .await;
        Fetched::classify(result, &[absent::NO_SUCH_CORS_CONFIGURATION])
    }

    async fn get_bucket_tagging(&self, bucket: &str) -> Fetched<GetBucketTaggingOutput> {
        let result = self
            .client
            .get_bucket_tagging()
            .bucket(bucket)
            .send()
            .instrument(tracing::debug_span!("send-get-bucket-tagging", bucket))
            .await;
        Fetched::classify(result, &[absent::NO_SUCH_TAG_SET])
    }
}

#[cfg(test)]
mod test {
    use super::{BucketBackend, Fetched, S3Backend};
    use crate::error::ErrorKind;
    use aws_sdk_s3::operation::get_bucket_acl::{GetBucketAclError, GetBucketAclOutput};
    use aws_sdk_s3::operation::get_bucket_cors::GetBucketCorsError;
    use aws_sdk_s3::operation::get_bucket_location::{
        GetBucketLocationError, GetBucketLocationOutput,
    };
    use aws_sdk_s3::operation::get_bucket_policy::GetBucketPolicyError;
    use aws_sdk_s3::types::BucketLocationConstraint;
    use aws_sdk_s3::Client;
    use aws_smithy_mocks_experimental::{mock, mock_client, RuleMode};
    use aws_smithy_types::error::ErrorMetadata;

    fn meta(code: &str) -> ErrorMetadata {
        ErrorMetadata::builder().code(code).build()
    }

    #[tokio::test]
    async fn test_found_passes_output_through() {
        let location = mock!(Client::get_bucket_location)
            .match_requests(|r| r.bucket() == Some("test-bucket"))
            .then_output(|| {
                GetBucketLocationOutput::builder()
                    .location_constraint(BucketLocationConstraint::EuWest1)
                    .build()
            });
        let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&location]);
        let backend = S3Backend::new(client);

        match backend.get_bucket_location("test-bucket").await {
            Fetched::Found(output) => assert_eq!(
                Some("eu-west-1"),
                output.location_constraint().map(|c| c.as_str())
            ),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_absent_codes_are_per_operation() {
        let location = mock!(Client::get_bucket_location)
            .then_error(|| GetBucketLocationError::generic(meta("NoSuchBucket")));
        let policy = mock!(Client::get_bucket_policy)
            .then_error(|| GetBucketPolicyError::generic(meta("NoSuchBucketPolicy")));
        // a missing CORS configuration code does not mean "no policy"
        let cors = mock!(Client::get_bucket_cors)
            .then_error(|| GetBucketCorsError::generic(meta("NoSuchBucketPolicy")));
        let client = mock_client!(
            aws_sdk_s3,
            RuleMode::MatchAny,
            &[&location, &policy, &cors]
        );
        let backend = S3Backend::new(client);

        assert!(matches!(
            backend.get_bucket_location("test-bucket").await,
            Fetched::Absent
        ));
        assert!(matches!(
            backend.get_bucket_policy("test-bucket").await,
            Fetched::Absent
        ));
        match backend.get_bucket_cors("test-bucket").await {
            Fetched::Fault(err) => assert_eq!(&ErrorKind::ServiceError, err.kind()),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fault_is_translated() {
        let acl = mock!(Client::get_bucket_acl)
            .then_error(|| GetBucketAclError::generic(meta("AccessDenied")));
        let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, &[&acl]);
        let backend = S3Backend::new(client);

        let err = backend
            .get_bucket_acl("test-bucket")
            .await
            .into_result()
            .unwrap_err();
        assert_eq!(&ErrorKind::ServiceError, err.kind());
    }

    #[test]
    fn test_into_result() {
        let found = Fetched::Found(GetBucketAclOutput::builder().build());
        assert!(found.into_result().unwrap().is_some());
        assert!(Fetched::<GetBucketAclOutput>::Absent
            .into_result()
            .unwrap()
            .is_none());
    }
}

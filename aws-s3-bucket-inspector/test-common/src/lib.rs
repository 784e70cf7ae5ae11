/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aws_s3_bucket_inspector::backend::{BucketBackend, Fetched};
use aws_s3_bucket_inspector::error::{Error, ErrorKind};
use aws_sdk_s3::operation::get_bucket_acl::GetBucketAclOutput;
use aws_sdk_s3::operation::get_bucket_cors::GetBucketCorsOutput;
use aws_sdk_s3::operation::get_bucket_encryption::GetBucketEncryptionOutput;
use aws_sdk_s3::operation::get_bucket_lifecycle_configuration::GetBucketLifecycleConfigurationOutput;
use aws_sdk_s3::operation::get_bucket_location::GetBucketLocationOutput;
use aws_sdk_s3::operation::get_bucket_logging::GetBucketLoggingOutput;
use aws_sdk_s3::operation::get_bucket_policy::GetBucketPolicyOutput;
use aws_sdk_s3::operation::get_bucket_tagging::GetBucketTaggingOutput;
use aws_sdk_s3::operation::get_bucket_versioning::GetBucketVersioningOutput;
use aws_sdk_s3::types::{
    CorsRule, ExpirationStatus, Grant, Grantee, LifecycleExpiration, LifecycleRule, Permission,
    Tag, Type,
};

/// URI of the predefined group that contains everyone.
pub const ALL_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";

/// URI of the predefined group that contains every authenticated AWS user.
pub const AUTHENTICATED_USERS_URI: &str =
    "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";

/// What a [`StubBackend`] answers for one operation.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    /// Respond with the given output
    Found(T),
    /// Report the operation's "not configured" fault
    Absent,
    /// Fail with a service error carrying the given code
    Fault(&'static str),
}

impl<T: Clone> Reply<T> {
    fn fetched(&self) -> Fetched<T> {
        match self {
            Reply::Found(output) => Fetched::Found(output.clone()),
            Reply::Absent => Fetched::Absent,
            Reply::Fault(code) => Fetched::Fault(Error::new(ErrorKind::ServiceError, *code)),
        }
    }
}

/// In-memory [`BucketBackend`] that records every operation it is asked to perform.
///
/// Clones share the call log, so keep a clone around to inspect calls after handing the
/// backend to a client.
///
/// The default describes an existing bucket in `us-east-1` with a private ACL and no optional
/// sub-resources configured.
#[derive(Debug, Clone)]
pub struct StubBackend {
    location: Reply<GetBucketLocationOutput>,
    acl: Reply<GetBucketAclOutput>,
    policy: Reply<GetBucketPolicyOutput>,
    logging: Reply<GetBucketLoggingOutput>,
    encryption: Reply<GetBucketEncryptionOutput>,
    lifecycle: Reply<GetBucketLifecycleConfigurationOutput>,
    versioning: Reply<GetBucketVersioningOutput>,
    cors: Reply<GetBucketCorsOutput>,
    tagging: Reply<GetBucketTaggingOutput>,
    calls: Arc<Mutex<Vec<(&'static str, String)>>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            location: Reply::Found(GetBucketLocationOutput::builder().build()),
            acl: Reply::Found(
                GetBucketAclOutput::builder()
                    .grants(grant(Type::CanonicalUser, None, Permission::FullControl))
                    .build(),
            ),
            policy: Reply::Absent,
            logging: Reply::Found(GetBucketLoggingOutput::builder().build()),
            encryption: Reply::Absent,
            lifecycle: Reply::Absent,
            versioning: Reply::Found(GetBucketVersioningOutput::builder().build()),
            cors: Reply::Absent,
            tagging: Reply::Absent,
            calls: Arc::default(),
        }
    }
}

impl StubBackend {
    /// A backend for a bucket that does not exist.
    pub fn missing_bucket() -> Self {
        Self::default().location(Reply::Absent)
    }

    /// Set the `GetBucketLocation` reply.
    pub fn location(mut self, reply: Reply<GetBucketLocationOutput>) -> Self {
        self.location = reply;
        self
    }

    /// Set the `GetBucketAcl` reply.
    pub fn acl(mut self, reply: Reply<GetBucketAclOutput>) -> Self {
        self.acl = reply;
        self
    }

    /// Set the `GetBucketPolicy` reply.
    pub fn policy(mut self, reply: Reply<GetBucketPolicyOutput>) -> Self {
        self.policy = reply;
        self
    }

    /// Set the `GetBucketLogging` reply.
    pub fn logging(mut self, reply: Reply<GetBucketLoggingOutput>) -> Self {
        self.logging = reply;
        self
    }

    /// Set the `GetBucketEncryption` reply.
    pub fn encryption(mut self, reply: Reply<GetBucketEncryptionOutput>) -> Self {
        self.encryption = reply;
        self
    }

    /// Set the `GetBucketLifecycleConfiguration` reply.
    pub fn lifecycle(mut self, reply: Reply<GetBucketLifecycleConfigurationOutput>) -> Self {
        self.lifecycle = reply;
        self
    }

    /// Set the `GetBucketVersioning` reply.
    pub fn versioning(mut self, reply: Reply<GetBucketVersioningOutput>) -> Self {
        self.versioning = reply;
        self
    }

    /// Set the `GetBucketCors` reply.
    pub fn cors(mut self, reply: Reply<GetBucketCorsOutput>) -> Self {
        self.cors = reply;
        self
    }

    /// Set the `GetBucketTagging` reply.
    pub fn tagging(mut self, reply: Reply<GetBucketTaggingOutput>) -> Self {
        self.tagging = reply;
        self
    }

    /// Names of the operations performed so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(operation, _)| *operation)
            .collect()
    }

    /// Number of times the given operation was performed.
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls().into_iter().filter(|op| *op == operation).count()
    }

    /// Bucket names the operations were performed on, in order.
    pub fn buckets(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, bucket)| bucket.clone())
            .collect()
    }

    fn record(&self, operation: &'static str, bucket: &str) {
        self.calls
            .lock()
            .unwrap()
            .push((operation, bucket.to_owned()));
    }
}

#[async_trait]
impl BucketBackend for StubBackend {
    async fn get_bucket_location(&self, bucket: &str) -> Fetched<GetBucketLocationOutput> {
        self.record("get_bucket_location", bucket);
        self.location.fetched()
    }

    async fn get_bucket_acl(&self, bucket: &str) -> Fetched<GetBucketAclOutput> {
        self.record("get_bucket_acl", bucket);
        self.acl.fetched()
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Fetched<GetBucketPolicyOutput> {
        self.record("get_bucket_policy", bucket);
        self.policy.fetched()
    }

    async fn get_bucket_logging(&self, bucket: &str) -> Fetched<GetBucketLoggingOutput> {
        self.record("get_bucket_logging", bucket);
        self.logging.fetched()
    }

    async fn get_bucket_encryption(&self, bucket: &str) -> Fetched<GetBucketEncryptionOutput> {
        self.record("get_bucket_encryption", bucket);
        self.encryption.fetched()
    }

    async fn get_bucket_lifecycle(
        &self,
        bucket: &str,
    ) -> Fetched<GetBucketLifecycleConfigurationOutput> {
        self.record("get_bucket_lifecycle", bucket);
        self.lifecycle.fetched()
    }

    async fn get_bucket_versioning(&self, bucket: &str) -> Fetched<GetBucketVersioningOutput> {
        self.record("get_bucket_versioning", bucket);
        self.versioning.fetched()
    }

    async fn get_bucket_cors(&self, bucket: &str) -> Fetched<GetBucketCorsOutput> {
        self.record("get_bucket_cors", bucket);
        self.cors.fetched()
    }

    async fn get_bucket_tagging(&self, bucket: &str) -> Fetched<GetBucketTaggingOutput> {
        self.record("get_bucket_tagging", bucket);
        self.tagging.fetched()
    }
}

/// An ACL grant for the given grantee.
pub fn grant(grantee_type: Type, uri: Option<&str>, permission: Permission) -> Grant {
    Grant::builder()
        .grantee(
            Grantee::builder()
                .r#type(grantee_type)
                .set_uri(uri.map(str::to_owned))
                .build()
                .unwrap(),
        )
        .permission(permission)
        .build()
}

/// A `GetBucketAcl` output with the given grants.
pub fn acl_output(grants: Vec<Grant>) -> GetBucketAclOutput {
    GetBucketAclOutput::builder().set_grants(Some(grants)).build()
}

/// A `GetBucketPolicy` output carrying the given policy document.
pub fn policy_output(document: serde_json::Value) -> GetBucketPolicyOutput {
    GetBucketPolicyOutput::builder()
        .policy(document.to_string())
        .build()
}

/// A `GetBucketTagging` output with the given tags.
pub fn tagging_output(tags: &[(&str, &str)]) -> GetBucketTaggingOutput {
    let tags = tags
        .iter()
        .map(|(key, value)| Tag::builder().key(*key).value(*value).build().unwrap())
        .collect();
    GetBucketTaggingOutput::builder()
        .set_tag_set(Some(tags))
        .build()
        .unwrap()
}

/// A `GetBucketLifecycleConfiguration` output with one rule expiring objects after `days`.
pub fn lifecycle_output(id: &str, days: i32) -> GetBucketLifecycleConfigurationOutput {
    let rule = LifecycleRule::builder()
        .id(id)
        .expiration(LifecycleExpiration::builder().days(days).build())
        .status(ExpirationStatus::Enabled)
        .build()
        .unwrap();
    GetBucketLifecycleConfigurationOutput::builder()
        .rules(rule)
        .build()
}

/// A `GetBucketCors` output with one rule allowing `GET` from the given origin.
pub fn cors_output(origin: &str) -> GetBucketCorsOutput {
    let rule = CorsRule::builder()
        .allowed_methods("GET")
        .allowed_origins(origin)
        .max_age_seconds(3000)
        .build()
        .unwrap();
    GetBucketCorsOutput::builder().cors_rules(rule).build()
}

/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

mod input;

/// Fluent builders
pub mod builders;

pub use input::{S3BucketInput, S3BucketInputBuilder};

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::backend::{BucketBackend, Fetched};
use crate::error::{self, Error};
use crate::policy::{self, PolicyStatement};
use crate::types::{AclGrant, BucketVersioningStatus, CorsRule, LifecycleRule, Tag};

/// Result of the location lookup performed when the resource is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Existence {
    Exists { region: Option<String> },
    Missing,
}

/// Values fetched so far. Each cell is filled at most once.
#[derive(Debug, Default)]
struct Cache {
    acl: OnceCell<Vec<AclGrant>>,
    policy: OnceCell<Vec<PolicyStatement>>,
    lifecycle: OnceCell<Vec<LifecycleRule>>,
    cors: OnceCell<Vec<CorsRule>>,
    tagging: OnceCell<Vec<Tag>>,
    versioning: OnceCell<Option<BucketVersioningStatus>>,
    default_encryption: OnceCell<bool>,
    access_logging: OnceCell<bool>,
}

/// Configuration of a single S3 bucket.
///
/// Created with [`Client::s3_bucket`](crate::Client::s3_bucket). Every accessor sends at most
/// one request for the lifetime of the resource; later calls are answered from memory.
///
/// Sub-resources that are not configured (no policy, no lifecycle rules, no CORS rules, no
/// tags) read as empty lists. Any other fault is returned as an [`Error`].
#[derive(Debug)]
pub struct S3Bucket {
    bucket_name: String,
    existence: Existence,
    backend: Arc<dyn BucketBackend>,
    cache: Cache,
}

impl S3Bucket {
    pub(crate) async fn load(
        input: S3BucketInput,
        backend: Arc<dyn BucketBackend>,
    ) -> Result<S3Bucket, Error> {
        let bucket_name = input.bucket_name().to_owned();

        // S3 has no "get bucket" call, the location lookup doubles as the existence check
        let existence = match backend.get_bucket_location(&bucket_name).await {
            Fetched::Found(output) => Existence::Exists {
                region: output
                    .location_constraint()
                    .map(|constraint| constraint.as_str())
                    .filter(|region| !region.is_empty())
                    .map(str::to_owned),
            },
            Fetched::Absent => Existence::Missing,
            Fetched::Fault(err) => return Err(err),
        };
        tracing::debug!("loaded bucket {bucket_name}: {existence:?}");

        Ok(S3Bucket {
            bucket_name,
            existence,
            backend,
            cache: Cache::default(),
        })
    }

    /// The name of the inspected bucket.
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// True unless S3 reported that the bucket does not exist.
    pub fn exists(&self) -> bool {
        matches!(self.existence, Existence::Exists { .. })
    }

    /// The bucket's location constraint.
    ///
    /// `None` when the bucket does not exist or lives in `us-east-1`, which S3 reports as an
    /// empty location constraint.
    pub fn region(&self) -> Option<&str> {
        match &self.existence {
            Existence::Exists { region } => region.as_deref(),
            Existence::Missing => None,
        }
    }

    /// The bucket's access control list.
    pub async fn bucket_acl(&self) -> Result<&[AclGrant], Error> {
        self.require_existing()?;
        let grants = self
            .cached(&self.cache.acl, "acl", |backend, bucket| async move {
                let output = backend.get_bucket_acl(bucket).await.into_result()?;
                Ok::<_, Error>(
                    output
                        .map(|output| output.grants().iter().map(AclGrant::from).collect())
                        .unwrap_or_default(),
                )
            })
            .await?;
        Ok(grants)
    }

    /// The statements of the bucket policy, empty when no policy is attached.
    pub async fn bucket_policy(&self) -> Result<&[PolicyStatement], Error> {
        self.require_existing()?;
        let statements = self
            .cached(&self.cache.policy, "policy", |backend, bucket| async move {
                let output = backend.get_bucket_policy(bucket).await.into_result()?;
                match output.as_ref().and_then(|output| output.policy()) {
                    Some(document) => policy::parse_statements(document),
                    None => Ok(Vec::new()),
                }
            })
            .await?;
        Ok(statements)
    }

    /// The bucket's lifecycle rules, empty when none are configured.
    pub async fn bucket_lifecycle(&self) -> Result<&[LifecycleRule], Error> {
        self.require_existing()?;
        let rules = self
            .cached(&self.cache.lifecycle, "lifecycle", |backend, bucket| async move {
                let output = backend.get_bucket_lifecycle(bucket).await.into_result()?;
                Ok::<_, Error>(
                    output
                        .map(|output| output.rules().to_vec())
                        .unwrap_or_default(),
                )
            })
            .await?;
        Ok(rules)
    }

    /// The bucket's CORS rules, empty when none are configured.
    pub async fn bucket_cors(&self) -> Result<&[CorsRule], Error> {
        self.require_existing()?;
        let rules = self
            .cached(&self.cache.cors, "cors", |backend, bucket| async move {
                let output = backend.get_bucket_cors(bucket).await.into_result()?;
                Ok::<_, Error>(
                    output
                        .map(|output| output.cors_rules().to_vec())
                        .unwrap_or_default(),
                )
            })
            .await?;
        Ok(rules)
    }

    /// The bucket's tags, empty when the bucket is not tagged.
    pub async fn bucket_tagging(&self) -> Result<&[Tag], Error> {
        self.require_existing()?;
        let tags = self
            .cached(&self.cache.tagging, "tagging", |backend, bucket| async move {
                let output = backend.get_bucket_tagging(bucket).await.into_result()?;
                Ok::<_, Error>(
                    output
                        .map(|output| output.tag_set().to_vec())
                        .unwrap_or_default(),
                )
            })
            .await?;
        Ok(tags)
    }

    /// True when the ACL grants access to everyone or to any authenticated AWS user, or when
    /// a policy statement allows access to the `"*"` principal.
    ///
    /// The policy is only fetched when the ACL is not public.
    pub async fn is_public(&self) -> Result<bool, Error> {
        if self.bucket_acl().await?.iter().any(AclGrant::is_public) {
            return Ok(true);
        }
        Ok(self
            .bucket_policy()
            .await?
            .iter()
            .any(PolicyStatement::is_public))
    }

    /// The bucket's versioning status, `None` if versioning was never configured.
    pub async fn versioning_status(&self) -> Result<Option<&BucketVersioningStatus>, Error> {
        self.require_existing()?;
        let status = self
            .cached(&self.cache.versioning, "versioning", |backend, bucket| async move {
                let output = backend.get_bucket_versioning(bucket).await.into_result()?;
                Ok::<_, Error>(output.and_then(|output| output.status().cloned()))
            })
            .await?;
        Ok(status.as_ref())
    }

    /// True when versioning is enabled (not suspended, not unconfigured).
    pub async fn is_versioned(&self) -> Result<bool, Error> {
        Ok(matches!(
            self.versioning_status().await?,
            Some(BucketVersioningStatus::Enabled)
        ))
    }

    /// True when a default server-side encryption configuration is set.
    ///
    /// Always `false`, without sending a request, for a bucket that does not exist.
    pub async fn has_default_encryption_enabled(&self) -> Result<bool, Error> {
        if !self.exists() {
            return Ok(false);
        }
        let enabled = self
            .cached(&self.cache.default_encryption, "encryption", |backend, bucket| async move {
                let output = backend.get_bucket_encryption(bucket).await.into_result()?;
                Ok::<_, Error>(output.is_some_and(|output| {
                    output.server_side_encryption_configuration().is_some()
                }))
            })
            .await?;
        Ok(*enabled)
    }

    /// True when server access logging is enabled.
    ///
    /// Always `false`, without sending a request, for a bucket that does not exist.
    pub async fn has_access_logging_enabled(&self) -> Result<bool, Error> {
        if !self.exists() {
            return Ok(false);
        }
        let enabled = self
            .cached(&self.cache.access_logging, "logging", |backend, bucket| async move {
                let output = backend.get_bucket_logging(bucket).await.into_result()?;
                Ok::<_, Error>(output.is_some_and(|output| output.logging_enabled().is_some()))
            })
            .await?;
        Ok(*enabled)
    }

    fn require_existing(&self) -> Result<(), Error> {
        match self.existence {
            Existence::Exists { .. } => Ok(()),
            Existence::Missing => Err(error::bucket_not_found(&self.bucket_name)),
        }
    }

    /// Return the cached value, or fill the cell with the result of `init`.
    ///
    /// A failed `init` leaves the cell empty.
    async fn cached<'a, T, F, Fut>(
        &'a self,
        cell: &'a OnceCell<T>,
        name: &'static str,
        init: F,
    ) -> Result<&'a T, Error>
    where
        F: FnOnce(&'a dyn BucketBackend, &'a str) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        if let Some(value) = cell.get() {
            tracing::trace!("{name} for {} served from cache", self.bucket_name);
            return Ok(value);
        }
        cell.get_or_try_init(|| init(self.backend.as_ref(), &self.bucket_name))
            .await
    }
}

impl fmt::Display for S3Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S3 Bucket {}", self.bucket_name)
    }
}

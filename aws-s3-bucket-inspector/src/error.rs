/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::ProvideErrorMetadata;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// S3 error code returned when the bucket does not exist.
pub(crate) const NO_SUCH_BUCKET: &str = "NoSuchBucket";

/// Errors returned by this library
///
/// NOTE: Use [`aws_smithy_types::error::display::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of inspection errors.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Resource parameter validation issues
    InputInvalid,

    /// The bucket does not exist
    BucketNotFound,

    /// The bucket policy document could not be understood
    PolicyInvalid,

    /// Any other fault reported by the service or the SDK (permissions, connectivity, etc)
    ServiceError,
}

impl Error {
    /// Creates a new inspection [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::BucketNotFound => write!(f, "bucket not found"),
            ErrorKind::PolicyInvalid => write!(f, "invalid bucket policy document"),
            ErrorKind::ServiceError => write!(f, "service error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::new(ErrorKind::PolicyInvalid, value)
    }
}

impl<E, R> From<aws_sdk_s3::error::SdkError<E, R>> for Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
    R: Send + Sync + fmt::Debug + 'static,
{
    fn from(value: aws_sdk_s3::error::SdkError<E, R>) -> Self {
        let kind = match value.code() {
            Some(NO_SUCH_BUCKET) => ErrorKind::BucketNotFound,
            _ => ErrorKind::ServiceError,
        };

        Error::new(kind, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn bucket_not_found(bucket_name: &str) -> Error {
    Error::new(
        ErrorKind::BucketNotFound,
        format!("bucket `{bucket_name}` does not exist"),
    )
}

#[cfg(test)]
mod test {
    use super::{Error, ErrorKind};
    use aws_sdk_s3::error::SdkError;
    use aws_sdk_s3::operation::get_bucket_acl::GetBucketAclError;
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;
    use aws_smithy_types::error::ErrorMetadata;

    fn service_error(code: &str) -> Error {
        let err = GetBucketAclError::generic(ErrorMetadata::builder().code(code).build());
        let raw = Response::new(StatusCode::try_from(403).unwrap(), SdkBody::empty());
        SdkError::service_error(err, raw).into()
    }

    #[test]
    fn test_no_such_bucket_maps_to_bucket_not_found() {
        assert_eq!(&ErrorKind::BucketNotFound, service_error("NoSuchBucket").kind());
    }

    #[test]
    fn test_other_codes_map_to_service_error() {
        assert_eq!(&ErrorKind::ServiceError, service_error("AccessDenied").kind());
        assert_eq!(&ErrorKind::ServiceError, service_error("SlowDown").kind());
    }

    #[test]
    fn test_source_is_kept() {
        let err = super::invalid_input("bucket_name is required");
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!("bucket_name is required", source.to_string());
    }
}

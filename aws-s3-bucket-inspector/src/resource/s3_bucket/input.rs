/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::error::operation::BuildError;
use serde_json::Value;

use crate::error;
use crate::resource::BUCKET_NAME_PARAM;

/// Validated parameters of an [`S3Bucket`](crate::resource::s3_bucket::S3Bucket) resource.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct S3BucketInput {
    bucket_name: String,
}

impl S3BucketInput {
    /// Creates a new builder-style object to manufacture [`S3BucketInput`](crate::resource::s3_bucket::S3BucketInput).
    pub fn builder() -> S3BucketInputBuilder {
        S3BucketInputBuilder::default()
    }

    /// Validate raw resource parameters.
    ///
    /// Accepts either a bare string, taken as the bucket name, or an object whose only key is
    /// `bucket_name` with a non-empty string value.
    pub fn from_params(params: &Value) -> Result<S3BucketInput, error::Error> {
        let bucket_name = match params {
            Value::String(bucket_name) => bucket_name,
            Value::Object(params) => {
                if let Some(unknown) = params.keys().find(|k| *k != BUCKET_NAME_PARAM) {
                    return Err(error::invalid_input(format!(
                        "unrecognized parameter `{unknown}`, expected only `{BUCKET_NAME_PARAM}`"
                    )));
                }
                match params.get(BUCKET_NAME_PARAM) {
                    Some(Value::String(bucket_name)) => bucket_name,
                    Some(other) => {
                        return Err(error::invalid_input(format!(
                            "`{BUCKET_NAME_PARAM}` must be a string, got `{other}`"
                        )))
                    }
                    None => {
                        return Err(error::invalid_input(format!(
                            "a `{BUCKET_NAME_PARAM}` parameter is required"
                        )))
                    }
                }
            }
            other => {
                return Err(error::invalid_input(format!(
                    "resource parameters must be a bucket name or an object, got `{other}`"
                )))
            }
        };

        Ok(S3BucketInput::builder().bucket_name(bucket_name).build()?)
    }

    /// The name of the bucket to inspect.
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

/// A builder for [`S3BucketInput`](crate::resource::s3_bucket::S3BucketInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct S3BucketInputBuilder {
    pub(crate) bucket_name: Option<String>,
}

impl S3BucketInputBuilder {
    /// Set the name of the bucket to inspect.
    ///
    /// NOTE: A non-empty bucket name is required.
    pub fn bucket_name(mut self, input: impl Into<String>) -> Self {
        self.bucket_name = Some(input.into());
        self
    }

    /// Set the name of the bucket to inspect.
    ///
    /// NOTE: A non-empty bucket name is required.
    pub fn set_bucket_name(mut self, input: Option<String>) -> Self {
        self.bucket_name = input;
        self
    }

    /// The name of the bucket to inspect.
    pub fn get_bucket_name(&self) -> &Option<String> {
        &self.bucket_name
    }

    /// Consumes the builder and constructs a [`S3BucketInput`](crate::resource::s3_bucket::S3BucketInput).
    pub fn build(self) -> Result<S3BucketInput, BuildError> {
        match self.bucket_name {
            None => Err(BuildError::missing_field(
                BUCKET_NAME_PARAM,
                "a bucket name is required",
            )),
            Some(bucket_name) if bucket_name.is_empty() => Err(BuildError::invalid_field(
                BUCKET_NAME_PARAM,
                "bucket name must not be empty",
            )),
            Some(bucket_name) => Ok(S3BucketInput { bucket_name }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::S3BucketInput;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_builder_requires_bucket_name() {
        assert!(S3BucketInput::builder().build().is_err());
        assert!(S3BucketInput::builder().bucket_name("").build().is_err());
        assert_eq!(
            "test-bucket",
            S3BucketInput::builder()
                .bucket_name("test-bucket")
                .build()
                .unwrap()
                .bucket_name()
        );
    }

    #[test]
    fn test_from_params() {
        let input = S3BucketInput::from_params(&json!({ "bucket_name": "test-bucket" })).unwrap();
        assert_eq!("test-bucket", input.bucket_name());

        let scalar = S3BucketInput::from_params(&json!("test-bucket")).unwrap();
        assert_eq!(input, scalar);
    }

    #[test]
    fn test_from_params_rejects_invalid_shapes() {
        for params in [
            json!({}),
            json!({ "bucket_name": 123 }),
            json!({ "bucket_name": null }),
            json!({ "bucket_name": "" }),
            json!({ "bucket_name": "test-bucket", "region": "us-east-1" }),
            json!({ "bucket": "test-bucket" }),
            json!(""),
            json!(["test-bucket"]),
            json!(42),
            json!(null),
        ] {
            let err = S3BucketInput::from_params(&params).unwrap_err();
            assert_eq!(&ErrorKind::InputInvalid, err.kind(), "{params}");
        }
    }
}

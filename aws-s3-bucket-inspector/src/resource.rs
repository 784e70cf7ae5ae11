/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Full configuration of a single bucket
pub mod s3_bucket;

/// Existence check for a single bucket
pub mod bucket_existence;

/// Name of the only parameter bucket resources recognize.
pub(crate) const BUCKET_NAME_PARAM: &str = "bucket_name";

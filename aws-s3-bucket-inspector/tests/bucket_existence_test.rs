/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_s3_bucket_inspector::error::ErrorKind;
use aws_s3_bucket_inspector::Client;
use serde_json::json;
use test_common::{Reply, StubBackend};

#[tokio::test]
async fn test_existing_bucket() {
    let backend = StubBackend::default();
    let client = Client::from_backend(backend.clone());
    let resource = client.bucket_existence(json!({ "bucket_name": "test-bucket" }));

    assert_eq!(Some("test-bucket"), resource.bucket_name());
    assert!(resource.exists().await.unwrap());
    assert_eq!("Object Storage Bucket test-bucket", resource.to_string());
    assert_eq!(vec!["get_bucket_location"], backend.calls());
    assert_eq!(vec!["test-bucket".to_owned()], backend.buckets());
}

#[tokio::test]
async fn test_missing_bucket() {
    let client = Client::from_backend(StubBackend::missing_bucket());
    let resource = client.bucket_existence(json!({ "bucket_name": "gone-bucket" }));

    assert!(!resource.exists().await.unwrap());
}

#[tokio::test]
async fn test_every_check_sends_a_request() {
    let backend = StubBackend::default();
    let client = Client::from_backend(backend.clone());
    let resource = client.bucket_existence(json!({ "bucket_name": "test-bucket" }));

    for _ in 0..3 {
        assert!(resource.exists().await.unwrap());
    }
    assert_eq!(3, backend.call_count("get_bucket_location"));
}

#[tokio::test]
async fn test_faults_propagate() {
    let backend = StubBackend::default().location(Reply::Fault("AccessDenied"));
    let client = Client::from_backend(backend);
    let err = client
        .bucket_existence(json!({ "bucket_name": "test-bucket" }))
        .exists()
        .await
        .unwrap_err();

    assert_eq!(&ErrorKind::ServiceError, err.kind());
}

#[tokio::test]
async fn test_missing_bucket_name_sends_no_request() {
    let backend = StubBackend::default();
    let client = Client::from_backend(backend.clone());

    for params in [json!({}), json!({ "bucket_name": 123 }), json!("test-bucket")] {
        let resource = client.bucket_existence(params);
        assert_eq!(None, resource.bucket_name());
        let err = resource.exists().await.unwrap_err();
        assert_eq!(&ErrorKind::InputInvalid, err.kind());
    }

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_extra_params_are_ignored() {
    let backend = StubBackend::default();
    let client = Client::from_backend(backend.clone());
    let resource = client.bucket_existence(json!({
        "bucket_name": "test-bucket",
        "endpoint": "https://storage.example.com"
    }));

    assert!(resource.exists().await.unwrap());
}

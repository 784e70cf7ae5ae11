/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::error::Error;

use aws_s3_bucket_inspector::error::Error as InspectError;
use aws_s3_bucket_inspector::resource::s3_bucket::S3Bucket;
use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;
use tracing::{debug_span, Instrument};

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "inspect")]
#[command(about = "Prints the compliance relevant configuration of an S3 bucket.")]
pub struct Args {
    /// Name of the bucket to inspect
    #[arg(required = true)]
    bucket: String,

    /// Region to send requests to
    #[arg(long)]
    region: Option<String>,

    /// Named profile from the shared AWS config and credentials files
    #[arg(long)]
    profile: Option<String>,

    /// Custom endpoint of an S3-compatible object storage service
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Only check whether the bucket exists
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    existence_only: bool,
}

async fn client(args: &Args) -> aws_s3_bucket_inspector::Client {
    let mut loader = aws_s3_bucket_inspector::from_env();
    if let Some(region) = &args.region {
        loader = loader.region(region);
    }
    if let Some(profile) = &args.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(endpoint_url) = &args.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    aws_s3_bucket_inspector::Client::new(loader.load().await)
}

fn print_check<T: std::fmt::Debug>(name: &str, result: Result<T, InspectError>) {
    match result {
        Ok(value) => println!("  {name:<28} {value:?}"),
        Err(err) => println!("  {name:<28} error: {}", DisplayErrorContext(&err)),
    }
}

async fn print_bucket(bucket: &S3Bucket) {
    println!("{bucket}");
    println!("  {:<28} {}", "exists", bucket.exists());
    if !bucket.exists() {
        return;
    }
    println!("  {:<28} {}", "region", bucket.region().unwrap_or("us-east-1"));

    print_check("public", bucket.is_public().await);
    print_check("versioned", bucket.is_versioned().await);
    print_check(
        "default encryption",
        bucket.has_default_encryption_enabled().await,
    );
    print_check("access logging", bucket.has_access_logging_enabled().await);
    print_check(
        "acl grants",
        bucket.bucket_acl().await.map(|grants| grants.len()),
    );
    print_check(
        "policy statements",
        bucket.bucket_policy().await.map(|statements| statements.len()),
    );
    print_check(
        "lifecycle rules",
        bucket.bucket_lifecycle().await.map(|rules| rules.len()),
    );
    print_check(
        "cors rules",
        bucket.bucket_cors().await.map(|rules| rules.len()),
    );
    print_check(
        "tags",
        bucket.bucket_tagging().await.map(|tags| {
            tags.iter()
                .map(|tag| format!("{}={}", tag.key(), tag.value()))
                .collect::<Vec<_>>()
        }),
    );
}

async fn do_inspect(args: Args) -> Result<(), BoxError> {
    let client = client(&args).await;

    if args.existence_only {
        let resource = client.bucket_existence(serde_json::json!({ "bucket_name": args.bucket }));
        let exists = resource
            .exists()
            .instrument(debug_span!("bucket-existence"))
            .await?;
        println!("{resource}");
        println!("  {:<28} {exists}", "exists");
        return Ok(());
    }

    let bucket = client
        .s3_bucket()
        .bucket_name(&args.bucket)
        .load()
        .instrument(debug_span!("load-bucket"))
        .await?;
    print_bucket(&bucket).instrument(debug_span!("inspect-bucket")).await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    if let Err(ref err) = do_inspect(args).await {
        tracing::error!("inspection failed: {}", DisplayErrorContext(err.as_ref()));
    }

    Ok(())
}

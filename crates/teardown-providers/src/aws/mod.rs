// ABOUTME: AWS SDK backed implementations of the four service traits
// ABOUTME: Loads per-region SDK configuration and maps SDK errors onto CloudError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # AWS Services
//!
//! CloudFront, ACM, and Route 53 clients share one region (ACM certificates
//! used by CloudFront live in `us-east-1`); S3 may use another. Credentials
//! come from the standard AWS provider chain.

mod acm;
mod cloudfront;
mod route53;
mod s3;

pub use acm::AcmCertificates;
pub use cloudfront::CloudFrontCdn;
pub use route53::Route53Dns;
pub use s3::S3Storage;

use aws_config::{BehaviorVersion, Region, SdkConfig};
// The error helpers are shared smithy types, re-exported by every SDK crate
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

use crate::core::CloudServices;
use crate::errors::CloudError;

/// Regions the clients are built for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsRegions {
    /// Region for CloudFront, ACM, and Route 53
    pub acm: String,
    /// Region for S3
    pub s3: String,
}

/// Factory for AWS-backed [`CloudServices`]
pub struct AwsServices;

impl AwsServices {
    /// Load SDK configuration for both regions and build the four clients
    pub async fn load(regions: &AwsRegions) -> CloudServices {
        let acm_config = load_sdk_config(&regions.acm).await;
        let s3_config = if regions.s3 == regions.acm {
            acm_config.clone()
        } else {
            load_sdk_config(&regions.s3).await
        };

        CloudServices::new(
            Arc::new(CloudFrontCdn::new(aws_sdk_cloudfront::Client::new(&acm_config))),
            Arc::new(AcmCertificates::new(aws_sdk_acm::Client::new(&acm_config))),
            Arc::new(S3Storage::new(aws_sdk_s3::Client::new(&s3_config))),
            Arc::new(Route53Dns::new(aws_sdk_route53::Client::new(&acm_config))),
        )
    }
}

async fn load_sdk_config(region: &str) -> SdkConfig {
    debug!(region = %region, "loading AWS SDK configuration");
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .load()
        .await
}

/// How a failed SDK call should be reported
pub(crate) struct ErrorMapping<'a> {
    pub service: &'static str,
    pub operation: &'static str,
    pub resource: &'static str,
    pub id: &'a str,
    /// Service error codes meaning the resource does not exist
    pub not_found_codes: &'static [&'static str],
}

impl ErrorMapping<'_> {
    /// Translate an SDK error into a [`CloudError`]
    pub(crate) fn map<E, R>(&self, err: &SdkError<E, R>) -> CloudError
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: Debug,
    {
        let code = err.as_service_error().and_then(ProvideErrorMetadata::code);
        match code {
            Some(code) if self.not_found_codes.contains(&code) => {
                CloudError::not_found(self.service, self.resource, self.id)
            }
            Some("PreconditionFailed") => {
                CloudError::precondition_failed(self.service, self.resource, self.id)
            }
            _ => CloudError::api(
                self.service,
                self.operation,
                DisplayErrorContext(err).to_string(),
            ),
        }
    }
}

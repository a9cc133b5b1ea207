// ABOUTME: CloudFront implementation of the CDN service trait
// ABOUTME: Lists, reconfigures, and deletes distributions with ETag-conditional writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use aws_sdk_cloudfront::types::{
    DistributionConfig, DistributionSummary as SdkSummary, SslSupportMethod,
    ViewerCertificate as SdkViewerCertificate,
};
use aws_sdk_cloudfront::Client;

use super::ErrorMapping;
use crate::constants::{resources, services};
use crate::core::CdnService;
use crate::errors::{CloudError, CloudResult};
use crate::models::{
    DeploymentStatus, DistributionConfigSnapshot, DistributionSummary, ViewerCertificate,
};

const NOT_FOUND_CODES: &[&str] = &["NoSuchDistribution"];

/// CDN service backed by CloudFront
pub struct CloudFrontCdn {
    client: Client,
}

impl CloudFrontCdn {
    /// Wrap an SDK client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    fn mapping<'a>(operation: &'static str, id: &'a str) -> ErrorMapping<'a> {
        ErrorMapping {
            service: services::CLOUDFRONT,
            operation,
            resource: resources::DISTRIBUTION,
            id,
            not_found_codes: NOT_FOUND_CODES,
        }
    }

    /// Current ETag and full SDK configuration
    async fn raw_config(&self, id: &str) -> CloudResult<(String, DistributionConfig)> {
        let output = self
            .client
            .get_distribution_config()
            .id(id)
            .send()
            .await
            .map_err(|e| Self::mapping("GetDistributionConfig", id).map(&e))?;
        let etag = output
            .e_tag()
            .ok_or_else(|| CloudError::invalid_response(services::CLOUDFRONT, "missing ETag"))?
            .to_owned();
        let config = output.distribution_config().cloned().ok_or_else(|| {
            CloudError::invalid_response(services::CLOUDFRONT, "missing DistributionConfig")
        })?;
        Ok((etag, config))
    }
}

fn summary_from_sdk(summary: &SdkSummary) -> DistributionSummary {
    DistributionSummary {
        id: summary.id().to_owned(),
        domain_name: summary.domain_name().to_owned(),
        aliases: summary
            .aliases()
            .map(|aliases| aliases.items().to_vec())
            .unwrap_or_default(),
        enabled: summary.enabled(),
        status: DeploymentStatus::from_status(summary.status()),
    }
}

fn certificate_from_sdk(certificate: Option<&SdkViewerCertificate>) -> ViewerCertificate {
    let Some(certificate) = certificate else {
        return ViewerCertificate::CloudFrontDefault;
    };
    if let Some(arn) = certificate.acm_certificate_arn() {
        ViewerCertificate::Acm {
            certificate_arn: arn.to_owned(),
        }
    } else if let Some(id) = certificate.iam_certificate_id() {
        ViewerCertificate::Iam {
            certificate_id: id.to_owned(),
        }
    } else {
        ViewerCertificate::CloudFrontDefault
    }
}

fn certificate_to_sdk(certificate: &ViewerCertificate) -> SdkViewerCertificate {
    match certificate {
        ViewerCertificate::CloudFrontDefault => SdkViewerCertificate::builder()
            .cloud_front_default_certificate(true)
            .build(),
        ViewerCertificate::Acm { certificate_arn } => SdkViewerCertificate::builder()
            .acm_certificate_arn(certificate_arn)
            .ssl_support_method(SslSupportMethod::SniOnly)
            .build(),
        ViewerCertificate::Iam { certificate_id } => SdkViewerCertificate::builder()
            .iam_certificate_id(certificate_id)
            .ssl_support_method(SslSupportMethod::SniOnly)
            .build(),
    }
}

#[async_trait]
impl CdnService for CloudFrontCdn {
    async fn list_distributions(&self) -> CloudResult<Vec<DistributionSummary>> {
        let mut summaries = Vec::new();
        let mut marker: Option<String> = None;
        loop {
            let output = self
                .client
                .list_distributions()
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| Self::mapping("ListDistributions", "*").map(&e))?;
            let Some(list) = output.distribution_list() else {
                break;
            };
            summaries.extend(list.items().iter().map(summary_from_sdk));
            match list.next_marker() {
                Some(next) if !next.is_empty() => marker = Some(next.to_owned()),
                _ => break,
            }
        }
        Ok(summaries)
    }

    async fn get_distribution_config(&self, id: &str) -> CloudResult<DistributionConfigSnapshot> {
        let (etag, config) = self.raw_config(id).await?;
        Ok(DistributionConfigSnapshot {
            etag,
            enabled: config.enabled(),
            aliases: config
                .aliases()
                .map(|aliases| aliases.items().to_vec())
                .unwrap_or_default(),
            viewer_certificate: certificate_from_sdk(config.viewer_certificate()),
        })
    }

    async fn update_distribution(
        &self,
        id: &str,
        config: &DistributionConfigSnapshot,
    ) -> CloudResult<String> {
        // The snapshot only carries the editable fields; everything else is
        // written back as currently stored. IfMatch uses the snapshot's ETag,
        // so a change made since the snapshot was taken is rejected.
        let (_, mut raw) = self.raw_config(id).await?;
        raw.enabled = config.enabled;
        if certificate_from_sdk(raw.viewer_certificate.as_ref()) != config.viewer_certificate {
            raw.viewer_certificate = Some(certificate_to_sdk(&config.viewer_certificate));
        }

        let output = self
            .client
            .update_distribution()
            .id(id)
            .if_match(&config.etag)
            .distribution_config(raw)
            .send()
            .await
            .map_err(|e| Self::mapping("UpdateDistribution", id).map(&e))?;
        output
            .e_tag()
            .map(str::to_owned)
            .ok_or_else(|| CloudError::invalid_response(services::CLOUDFRONT, "missing ETag"))
    }

    async fn delete_distribution(&self, id: &str, etag: &str) -> CloudResult<()> {
        self.client
            .delete_distribution()
            .id(id)
            .if_match(etag)
            .send()
            .await
            .map_err(|e| Self::mapping("DeleteDistribution", id).map(&e))?;
        Ok(())
    }
}

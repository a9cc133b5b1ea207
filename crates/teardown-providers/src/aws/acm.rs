// ABOUTME: ACM implementation of the certificate service trait
// ABOUTME: Pages through certificate summaries and deletes certificates by ARN
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use aws_sdk_acm::Client;

use super::ErrorMapping;
use crate::constants::{resources, services};
use crate::core::CertificateService;
use crate::errors::CloudResult;
use crate::models::CertificateSummary;

const NOT_FOUND_CODES: &[&str] = &["ResourceNotFoundException"];

/// Certificate service backed by ACM
pub struct AcmCertificates {
    client: Client,
}

impl AcmCertificates {
    /// Wrap an SDK client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    fn mapping<'a>(operation: &'static str, id: &'a str) -> ErrorMapping<'a> {
        ErrorMapping {
            service: services::ACM,
            operation,
            resource: resources::CERTIFICATE,
            id,
            not_found_codes: NOT_FOUND_CODES,
        }
    }
}

#[async_trait]
impl CertificateService for AcmCertificates {
    async fn list_certificates(&self) -> CloudResult<Vec<CertificateSummary>> {
        let mut certificates = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let output = self
                .client
                .list_certificates()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| Self::mapping("ListCertificates", "*").map(&e))?;

            certificates.extend(output.certificate_summary_list().iter().filter_map(|summary| {
                Some(CertificateSummary {
                    arn: summary.certificate_arn()?.to_owned(),
                    domain_name: summary.domain_name().unwrap_or_default().to_owned(),
                    in_use: summary.in_use(),
                })
            }));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_owned()),
                _ => break,
            }
        }
        Ok(certificates)
    }

    async fn delete_certificate(&self, arn: &str) -> CloudResult<()> {
        self.client
            .delete_certificate()
            .certificate_arn(arn)
            .send()
            .await
            .map_err(|e| Self::mapping("DeleteCertificate", arn).map(&e))?;
        Ok(())
    }
}

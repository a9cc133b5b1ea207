// ABOUTME: Certificate step: delete the ACM certificate issued for exactly the domain
// ABOUTME: Returns the deleted ARN, or None when no certificate matches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::{debug, info};

use super::Teardown;
use crate::errors::AppResult;

impl Teardown {
    pub(crate) async fn delete_certificate(&self) -> AppResult<Option<String>> {
        let domain = &self.config.domain;
        let certificates = self.services.certificates.list_certificates().await?;
        debug!(count = certificates.len(), "Listed certificates");

        let Some(certificate) = certificates.into_iter().find(|c| c.is_for_domain(domain)) else {
            return Ok(None);
        };
        info!(
            certificate.arn = %certificate.arn,
            domain = %domain,
            "Deleting certificate {}",
            certificate.arn
        );
        self.services
            .certificates
            .delete_certificate(&certificate.arn)
            .await?;
        Ok(Some(certificate.arn))
    }
}

// ABOUTME: TLS certificate summary as listed by the certificate service
// ABOUTME: Identifies certificates by ARN and primary domain name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// One entry of the certificate list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSummary {
    /// Certificate ARN
    pub arn: String,
    /// Primary domain name the certificate was issued for
    pub domain_name: String,
    /// Whether a service still references the certificate, when reported
    pub in_use: Option<bool>,
}

impl CertificateSummary {
    /// Whether the certificate was issued for exactly `domain`
    #[must_use]
    pub fn is_for_domain(&self, domain: &str) -> bool {
        self.domain_name == domain
    }
}

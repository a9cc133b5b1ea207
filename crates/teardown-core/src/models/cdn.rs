// ABOUTME: CDN distribution models: list summaries, deployment status, and editable config
// ABOUTME: The config snapshot carries the ETag needed for conditional updates and deletes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::cdn::{STATUS_DEPLOYED, STATUS_IN_PROGRESS};

/// Propagation state of a distribution's latest configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    /// All edge locations serve the latest configuration
    Deployed,
    /// A configuration change is still propagating
    InProgress,
    /// Any status string the service adds later
    Other(String),
}

impl DeploymentStatus {
    /// Parse the status string reported by the service
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status {
            STATUS_DEPLOYED => Self::Deployed,
            STATUS_IN_PROGRESS => Self::InProgress,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Status string as the service spells it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Deployed => STATUS_DEPLOYED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Other(status) => status,
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the distribution list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Distribution identifier (e.g. `E2QWRUHAPOMQZL`)
    pub id: String,
    /// Service-assigned domain name (`d111111abcdef8.cloudfront.net`)
    pub domain_name: String,
    /// Alternate domain names (CNAMEs) served by the distribution
    pub aliases: Vec<String>,
    /// Whether the distribution accepts viewer requests
    pub enabled: bool,
    /// Propagation state
    pub status: DeploymentStatus,
}

impl DistributionSummary {
    /// Whether `domain` is one of the distribution's aliases
    #[must_use]
    pub fn serves_alias(&self, domain: &str) -> bool {
        self.aliases.iter().any(|alias| alias == domain)
    }

    /// Disabled and fully propagated, the state deletion requires
    #[must_use]
    pub fn is_disabled_and_deployed(&self) -> bool {
        !self.enabled && self.status == DeploymentStatus::Deployed
    }
}

/// TLS certificate a distribution presents to viewers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ViewerCertificate {
    /// The `*.cloudfront.net` certificate
    CloudFrontDefault,
    /// A certificate managed by ACM
    Acm {
        /// ARN of the ACM certificate
        certificate_arn: String,
    },
    /// A certificate uploaded to IAM
    Iam {
        /// IAM server certificate id
        certificate_id: String,
    },
}

impl ViewerCertificate {
    /// ARN of the ACM certificate, if one is attached
    #[must_use]
    pub fn acm_certificate_arn(&self) -> Option<&str> {
        match self {
            Self::Acm { certificate_arn } => Some(certificate_arn),
            Self::CloudFrontDefault | Self::Iam { .. } => None,
        }
    }
}

/// Editable subset of a distribution configuration plus its version token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfigSnapshot {
    /// Version token; updates and deletes are conditional on it
    pub etag: String,
    /// Whether the distribution accepts viewer requests
    pub enabled: bool,
    /// Alternate domain names
    pub aliases: Vec<String>,
    /// Certificate presented to viewers
    pub viewer_certificate: ViewerCertificate,
}

impl DistributionConfigSnapshot {
    /// Copy with the distribution disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Copy with the certificate swapped for the CloudFront default
    #[must_use]
    pub fn with_default_certificate(mut self) -> Self {
        self.viewer_certificate = ViewerCertificate::CloudFrontDefault;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(enabled: bool, status: &str) -> DistributionSummary {
        DistributionSummary {
            id: "E1".to_owned(),
            domain_name: "d1.cloudfront.net".to_owned(),
            aliases: vec!["example.com".to_owned(), "www.example.com".to_owned()],
            enabled,
            status: DeploymentStatus::from_status(status),
        }
    }

    #[test]
    fn test_alias_match_is_exact() {
        let dist = summary(true, "Deployed");
        assert!(dist.serves_alias("example.com"));
        assert!(dist.serves_alias("www.example.com"));
        assert!(!dist.serves_alias("example.co"));
        assert!(!dist.serves_alias("api.example.com"));
    }

    #[test]
    fn test_disabled_and_deployed_requires_both() {
        assert!(summary(false, "Deployed").is_disabled_and_deployed());
        assert!(!summary(true, "Deployed").is_disabled_and_deployed());
        assert!(!summary(false, "InProgress").is_disabled_and_deployed());
    }

    #[test]
    fn test_unknown_status_round_trips() {
        let status = DeploymentStatus::from_status("Pending");
        assert_eq!(status, DeploymentStatus::Other("Pending".to_owned()));
        assert_eq!(status.to_string(), "Pending");
    }

    #[test]
    fn test_default_certificate_swap() {
        let snapshot = DistributionConfigSnapshot {
            etag: "E1".to_owned(),
            enabled: true,
            aliases: vec![],
            viewer_certificate: ViewerCertificate::Acm {
                certificate_arn: "arn:aws:acm:us-east-1:1:certificate/abc".to_owned(),
            },
        };
        assert!(snapshot.viewer_certificate.acm_certificate_arn().is_some());
        let swapped = snapshot.disabled().with_default_certificate();
        assert!(!swapped.enabled);
        assert_eq!(swapped.viewer_certificate, ViewerCertificate::CloudFrontDefault);
        assert_eq!(swapped.etag, "E1");
    }
}

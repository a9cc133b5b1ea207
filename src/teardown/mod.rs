// ABOUTME: Sequential teardown of a single-domain hosting stack
// ABOUTME: Distribution, then certificate, then bucket, then DNS; a missing resource stops the run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Teardown Workflow
//!
//! [`Teardown::run`] removes the stack in dependency order:
//!
//! 1. Find the CDN distribution serving the domain, disable it, wait for the
//!    change to deploy, detach its ACM certificate, and delete it
//! 2. Delete the ACM certificate issued for the domain
//! 3. Empty and delete the bucket
//! 4. Delete the apex and `www` A/CNAME records, and optionally the zone
//!
//! A resource that cannot be found is logged and ends the run with an
//! ordinary report. Errors from service calls propagate to the caller,
//! except the distribution delete, which is recorded and does not block
//! the later steps.

mod bucket;
mod certificate;
mod distribution;
mod dns;
/// Run outcome types
pub mod report;

pub use dns::select_site_records;
pub use report::{Step, StepOutcome, TeardownReport};

use tracing::{info, warn};

use crate::config::TeardownConfig;
use crate::errors::{AppError, AppResult};
use teardown_providers::CloudServices;

/// One teardown run against a set of service clients
pub struct Teardown {
    config: TeardownConfig,
    services: CloudServices,
}

impl Teardown {
    /// Prepare a run
    #[must_use]
    pub fn new(config: TeardownConfig, services: CloudServices) -> Self {
        Self { config, services }
    }

    /// Remove the stack
    ///
    /// # Errors
    ///
    /// Returns the first service error outside the distribution delete and
    /// bucket steps, or `OperationTimedOut` when a deployment wait exceeds
    /// the configured maximum
    pub async fn run(&self) -> AppResult<TeardownReport> {
        let domain = &self.config.domain;
        let bucket = &self.config.bucket;
        let mut report = TeardownReport::new(domain.as_str(), bucket.as_str());

        info!(domain = %domain, "Domain name: {domain}");
        info!(bucket = %bucket, "Bucket name: {bucket}");

        let Some(distribution_id) = self.locate_distribution().await? else {
            info!(domain = %domain, "CloudFront distribution for domain {domain} not found.");
            report.distribution = StepOutcome::NotFound;
            report.stop(Step::Distribution);
            return Ok(report.finish());
        };
        report.distribution_id = Some(distribution_id.clone());

        self.disable_distribution(&distribution_id).await?;
        self.wait_for_deployment(&distribution_id).await?;
        if self.remove_certificate_from_distribution(&distribution_id).await? {
            self.wait_for_deployment(&distribution_id).await?;
        }
        report.distribution = match self.delete_distribution(&distribution_id).await {
            Ok(()) => StepOutcome::Completed,
            Err(e) => {
                warn!(
                    distribution.id = %distribution_id,
                    error = %e,
                    "Failed to delete CloudFront distribution {distribution_id}"
                );
                StepOutcome::Failed(e.to_string())
            }
        };

        match self.delete_certificate().await? {
            Some(arn) => {
                report.certificate_arn = Some(arn);
                report.certificate = StepOutcome::Completed;
            }
            None => {
                info!(domain = %domain, "Certificate for domain {domain} not found.");
                report.certificate = StepOutcome::NotFound;
                report.stop(Step::Certificate);
                return Ok(report.finish());
            }
        }

        match self.delete_bucket(&mut report).await {
            Ok(()) => report.bucket_removal = StepOutcome::Completed,
            Err(e) => {
                warn!(bucket = %bucket, error = %e, "Bucket {bucket} not found.");
                report.bucket_removal = if e.is_not_found() {
                    StepOutcome::NotFound
                } else {
                    StepOutcome::Failed(AppError::from(e).to_string())
                };
                report.stop(Step::Bucket);
                return Ok(report.finish());
            }
        }

        let Some(zone) = self.find_hosted_zone().await? else {
            info!(domain = %domain, "Hosted zone for domain {domain} not found.");
            report.dns_records = StepOutcome::NotFound;
            report.stop(Step::DnsRecords);
            return Ok(report.finish());
        };
        report.records_deleted = self.delete_dns_records(&zone).await?;
        report.dns_records = if report.records_deleted > 0 {
            StepOutcome::Completed
        } else {
            StepOutcome::Skipped
        };

        if self.config.delete_hosted_zone {
            self.delete_hosted_zone(&zone).await?;
            report.hosted_zone = StepOutcome::Completed;
        }

        Ok(report.finish())
    }
}

// ABOUTME: CDN distribution steps: locate by alias, disable, wait for deployment, detach, delete
// ABOUTME: Every write is conditional on the ETag read immediately before it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use super::Teardown;
use crate::constants::{resources, services};
use crate::errors::{AppError, AppResult};

impl Teardown {
    /// Distribution to tear down: the configured id, or the first one
    /// listing the domain among its aliases
    pub(crate) async fn locate_distribution(&self) -> AppResult<Option<String>> {
        if let Some(id) = &self.config.distribution_id {
            info!(distribution.id = %id, "Using configured CloudFront distribution {id}");
            return Ok(Some(id.clone()));
        }

        let distributions = self.services.cdn.list_distributions().await?;
        let found = distributions
            .into_iter()
            .find(|d| d.serves_alias(&self.config.domain))
            .map(|d| d.id);
        if let Some(id) = &found {
            info!(
                distribution.id = %id,
                domain = %self.config.domain,
                "Found CloudFront distribution {id}"
            );
        }
        Ok(found)
    }

    /// Turn the distribution off
    pub(crate) async fn disable_distribution(&self, id: &str) -> AppResult<()> {
        let config = self.services.cdn.get_distribution_config(id).await?;
        if !config.enabled {
            debug!(distribution.id = %id, "Distribution already disabled");
        }
        info!(distribution.id = %id, "Disabling CloudFront distribution {id}");
        let etag = self
            .services
            .cdn
            .update_distribution(id, &config.disabled())
            .await?;
        debug!(distribution.id = %id, etag = %etag, "Disable request accepted");
        Ok(())
    }

    /// Poll the distribution list until `id` reports `Deployed` and disabled
    pub(crate) async fn wait_for_deployment(&self, id: &str) -> AppResult<()> {
        let polling = &self.config.polling;
        let started = Instant::now();

        loop {
            let distributions = self.services.cdn.list_distributions().await?;
            let distribution = distributions.iter().find(|d| d.id == id).ok_or_else(|| {
                AppError::not_found(format!("CloudFront distribution {id}"))
                    .with_service(services::CLOUDFRONT)
                    .with_resource_id(id)
            })?;

            if distribution.is_disabled_and_deployed() {
                info!(
                    distribution.id = %id,
                    waited_secs = started.elapsed().as_secs(),
                    "Distribution {id} is disabled and deployed"
                );
                return Ok(());
            }

            if let Some(max_wait) = polling.max_wait {
                if started.elapsed() >= max_wait {
                    return Err(AppError::timed_out(
                        format!("Deployment of {} {id}", resources::DISTRIBUTION),
                        max_wait.as_secs(),
                    )
                    .with_service(services::CLOUDFRONT)
                    .with_resource_id(id));
                }
            }

            info!(
                distribution.id = %id,
                status = %distribution.status,
                enabled = distribution.enabled,
                "Waiting {}s for distribution {id} to deploy",
                polling.interval.as_secs()
            );
            sleep(polling.interval).await;
        }
    }

    /// Swap an attached ACM certificate for the CloudFront default; returns
    /// whether an update was made
    pub(crate) async fn remove_certificate_from_distribution(&self, id: &str) -> AppResult<bool> {
        let config = self.services.cdn.get_distribution_config(id).await?;
        let Some(arn) = config.viewer_certificate.acm_certificate_arn() else {
            debug!(distribution.id = %id, "No ACM certificate attached");
            return Ok(false);
        };
        info!(
            distribution.id = %id,
            certificate.arn = %arn,
            "Detaching certificate from distribution {id}"
        );
        self.services
            .cdn
            .update_distribution(id, &config.with_default_certificate())
            .await?;
        Ok(true)
    }

    /// Delete the distribution with a freshly read ETag
    pub(crate) async fn delete_distribution(&self, id: &str) -> AppResult<()> {
        let config = self.services.cdn.get_distribution_config(id).await?;
        info!(distribution.id = %id, "Deleting CloudFront distribution {id}");
        self.services
            .cdn
            .delete_distribution(id, &config.etag)
            .await?;
        Ok(())
    }
}

// ABOUTME: Environment configuration for a teardown run: domain, bucket, regions, polling
// ABOUTME: Loads .env, reads environment variables, applies command-line overrides, validates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration for a teardown run

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult};
use crate::models::fqdn;

/// Regions the service clients are created in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Region for CloudFront, ACM, and Route 53
    pub acm: String,
    /// Region for S3
    pub s3: String,
}

/// Deployment polling behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between distribution status checks
    pub interval: Duration,
    /// Give up waiting after this long; `None` waits indefinitely
    pub max_wait: Option<Duration>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(defaults::POLL_INTERVAL_SECS),
            max_wait: None,
        }
    }
}

/// Values given on the command line; each one replaces its environment variable
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--domain`
    pub domain: Option<String>,
    /// `--bucket`
    pub bucket: Option<String>,
    /// `--distribution-id`
    pub distribution_id: Option<String>,
    /// `--acm-region`
    pub acm_region: Option<String>,
    /// `--s3-region`
    pub s3_region: Option<String>,
    /// `--poll-interval-secs`
    pub poll_interval_secs: Option<u64>,
    /// `--max-wait-secs`
    pub max_wait_secs: Option<u64>,
    /// `--delete-hosted-zone`
    pub delete_hosted_zone: bool,
}

/// Everything a teardown run needs to know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownConfig {
    /// Domain whose stack is removed (`example.com`)
    pub domain: String,
    /// Bucket to empty and delete
    pub bucket: String,
    /// Use this distribution instead of looking one up by alias
    pub distribution_id: Option<String>,
    /// Client regions
    pub regions: RegionConfig,
    /// Deployment polling
    pub polling: PollingConfig,
    /// Delete the hosted zone once its site records are gone
    pub delete_hosted_zone: bool,
}

impl TeardownConfig {
    /// Load `.env` from the working directory; returns whether one was found
    pub fn load_dotenv() -> bool {
        match dotenvy::dotenv() {
            Ok(path) => {
                info!(path = %path.display(), "Loaded environment file");
                true
            }
            Err(e) if e.not_found() => {
                warn!("No .env file found, using process environment only");
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse .env file, using process environment only");
                false
            }
        }
    }

    /// Load a specific env file
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file exists but cannot be parsed
    pub fn load_env_file(path: &Path) -> AppResult<()> {
        dotenvy::from_path(path).map_err(|e| {
            AppError::config(format!("failed to load {}: {e}", path.display())).with_source(e)
        })
    }

    /// Build the configuration from process environment variables alone
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the domain or bucket is unset and
    /// `ConfigInvalid` when a value cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        Self::resolve(CliOverrides::default())
    }

    /// Build the configuration from the environment with command-line overrides
    ///
    /// # Errors
    ///
    /// Same as [`TeardownConfig::from_env`]
    pub fn resolve(overrides: CliOverrides) -> AppResult<Self> {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`TeardownConfig::from_env`]
    pub fn resolve_with<F>(overrides: CliOverrides, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, matching how shells export blank lines
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let domain = overrides
            .domain
            .or_else(|| var(env_vars::DOMAIN_NAME))
            .ok_or_else(|| AppError::config_missing(env_vars::DOMAIN_NAME))?;
        let bucket = overrides
            .bucket
            .or_else(|| var(env_vars::BUCKET_NAME))
            .ok_or_else(|| AppError::config_missing(env_vars::BUCKET_NAME))?;

        let acm_region = overrides
            .acm_region
            .or_else(|| var(env_vars::ACM_REGION))
            .unwrap_or_else(|| defaults::ACM_REGION.to_owned());
        let s3_region = overrides
            .s3_region
            .or_else(|| var(env_vars::S3_REGION))
            .unwrap_or_else(|| acm_region.clone());

        let interval_secs = match overrides.poll_interval_secs {
            Some(secs) => secs,
            None => parse_var(&var, env_vars::POLL_INTERVAL_SECS)?
                .unwrap_or(defaults::POLL_INTERVAL_SECS),
        };
        let max_wait_secs = match overrides.max_wait_secs {
            Some(secs) => Some(secs),
            None => parse_var::<u64>(&var, env_vars::MAX_WAIT_SECS)?,
        };
        let delete_hosted_zone = overrides.delete_hosted_zone
            || var(env_vars::DELETE_HOSTED_ZONE)
                .map(|v| parse_bool(env_vars::DELETE_HOSTED_ZONE, &v))
                .transpose()?
                .unwrap_or(false);

        let config = Self {
            domain,
            bucket,
            distribution_id: overrides
                .distribution_id
                .or_else(|| var(env_vars::DISTRIBUTION_ID)),
            regions: RegionConfig {
                acm: acm_region,
                s3: s3_region,
            },
            polling: PollingConfig {
                interval: Duration::from_secs(interval_secs),
                max_wait: max_wait_secs.map(Duration::from_secs),
            },
            delete_hosted_zone,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replace loaded values with the ones given on the command line
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the result no longer validates
    pub fn apply_overrides(mut self, overrides: CliOverrides) -> AppResult<Self> {
        if let Some(domain) = overrides.domain {
            self.domain = domain;
        }
        if let Some(bucket) = overrides.bucket {
            self.bucket = bucket;
        }
        if overrides.distribution_id.is_some() {
            self.distribution_id = overrides.distribution_id;
        }
        if let Some(region) = overrides.acm_region {
            self.regions.acm = region;
        }
        if let Some(region) = overrides.s3_region {
            self.regions.s3 = region;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            self.polling.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = overrides.max_wait_secs {
            self.polling.max_wait = Some(Duration::from_secs(secs));
        }
        self.delete_hosted_zone |= overrides.delete_hosted_zone;
        self.validate()?;
        Ok(self)
    }

    /// Check values the services would otherwise reject mid-run
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the offending variable
    pub fn validate(&self) -> AppResult<()> {
        if self.domain.trim().is_empty() {
            return Err(AppError::config_invalid(env_vars::DOMAIN_NAME, "must not be empty"));
        }
        if self.bucket.trim().is_empty() {
            return Err(AppError::config_invalid(env_vars::BUCKET_NAME, "must not be empty"));
        }
        if self.domain.contains("://") || self.domain.contains('/') {
            return Err(AppError::config_invalid(
                env_vars::DOMAIN_NAME,
                "expected a bare domain name such as example.com",
            ));
        }
        if self.domain.ends_with('.') {
            return Err(AppError::config_invalid(
                env_vars::DOMAIN_NAME,
                "must not end with a trailing dot",
            ));
        }
        if self.bucket.contains('/') {
            return Err(AppError::config_invalid(
                env_vars::BUCKET_NAME,
                "bucket names cannot contain '/'",
            ));
        }
        if self.polling.interval.is_zero() {
            return Err(AppError::config_invalid(
                env_vars::POLL_INTERVAL_SECS,
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Apex record name (`example.com.`)
    #[must_use]
    pub fn fqdn(&self) -> String {
        fqdn(&self.domain)
    }

    /// `www` record name (`www.example.com.`)
    #[must_use]
    pub fn www_fqdn(&self) -> String {
        fqdn(&format!("{}.{}", crate::constants::dns::WWW_LABEL, self.domain))
    }

    /// Log the resolved configuration
    pub fn log_summary(&self) {
        info!(
            domain = %self.domain,
            bucket = %self.bucket,
            distribution.id = self.distribution_id.as_deref().unwrap_or("<lookup by alias>"),
            region.acm = %self.regions.acm,
            region.s3 = %self.regions.s3,
            poll.interval_secs = self.polling.interval.as_secs(),
            poll.max_wait_secs = self.polling.max_wait.map(|d| d.as_secs()),
            delete_hosted_zone = self.delete_hosted_zone,
            "Teardown configuration loaded"
        );
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::config_invalid(key, format!("'{raw}': {e}")))
        })
        .transpose()
}

fn parse_bool(key: &str, raw: &str) -> AppResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config_invalid(key, format!("'{raw}' is not a boolean"))),
    }
}

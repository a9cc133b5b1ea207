// ABOUTME: Core service traits for the four managed services the teardown drives
// ABOUTME: Defines CdnService, CertificateService, ObjectStorageService, DnsService, and CloudServices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Service Traits
//!
//! Each trait covers exactly the calls the teardown makes against one
//! service. Requests take plain identifiers; responses are the
//! provider-agnostic models from `teardown-core`. All methods return
//! [`CloudResult`], so a missing resource surfaces as
//! [`CloudError::NotFound`](crate::errors::CloudError::NotFound) regardless
//! of backend.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::CloudResult;
use crate::models::{
    CertificateSummary, ChangeInfo, DistributionConfigSnapshot, DistributionSummary, HostedZone,
    ObjectPage, RecordChange, RecordSet,
};

/// CDN distribution operations
#[async_trait]
pub trait CdnService: Send + Sync {
    /// List every distribution in the account, following pagination markers
    async fn list_distributions(&self) -> CloudResult<Vec<DistributionSummary>>;

    /// Read the editable configuration and its current ETag
    async fn get_distribution_config(&self, id: &str) -> CloudResult<DistributionConfigSnapshot>;

    /// Write `config` back, conditional on `config.etag`; returns the new ETag
    async fn update_distribution(
        &self,
        id: &str,
        config: &DistributionConfigSnapshot,
    ) -> CloudResult<String>;

    /// Delete a disabled, deployed distribution, conditional on `etag`
    async fn delete_distribution(&self, id: &str, etag: &str) -> CloudResult<()>;
}

/// TLS certificate operations
#[async_trait]
pub trait CertificateService: Send + Sync {
    /// List every certificate, following pagination tokens
    async fn list_certificates(&self) -> CloudResult<Vec<CertificateSummary>>;

    /// Delete a certificate by ARN
    async fn delete_certificate(&self, arn: &str) -> CloudResult<()>;
}

/// Object storage operations
#[async_trait]
pub trait ObjectStorageService: Send + Sync {
    /// List one page of objects, starting at `continuation_token` when given
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
    ) -> CloudResult<ObjectPage>;

    /// Delete one object
    async fn delete_object(&self, bucket: &str, key: &str) -> CloudResult<()>;

    /// Delete an empty bucket
    async fn delete_bucket(&self, bucket: &str) -> CloudResult<()>;
}

/// DNS operations
#[async_trait]
pub trait DnsService: Send + Sync {
    /// Zones in name order, starting at `dns_name`
    async fn list_hosted_zones_by_name(&self, dns_name: &str) -> CloudResult<Vec<HostedZone>>;

    /// Every record set in the zone, following pagination
    async fn list_resource_record_sets(&self, zone_id: &str) -> CloudResult<Vec<RecordSet>>;

    /// Apply `changes` as one atomic batch
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[RecordChange],
    ) -> CloudResult<ChangeInfo>;

    /// Delete a zone that holds only its NS and SOA records
    async fn delete_hosted_zone(&self, zone_id: &str) -> CloudResult<()>;
}

/// The four service clients a teardown run needs
#[derive(Clone)]
pub struct CloudServices {
    /// CDN client
    pub cdn: Arc<dyn CdnService>,
    /// Certificate client
    pub certificates: Arc<dyn CertificateService>,
    /// Object storage client
    pub storage: Arc<dyn ObjectStorageService>,
    /// DNS client
    pub dns: Arc<dyn DnsService>,
}

impl CloudServices {
    /// Bundle four clients
    #[must_use]
    pub fn new(
        cdn: Arc<dyn CdnService>,
        certificates: Arc<dyn CertificateService>,
        storage: Arc<dyn ObjectStorageService>,
        dns: Arc<dyn DnsService>,
    ) -> Self {
        Self {
            cdn,
            certificates,
            storage,
            dns,
        }
    }

    /// Use one value that implements every service, such as the synthetic cloud
    #[must_use]
    pub fn from_single<T>(backend: Arc<T>) -> Self
    where
        T: CdnService + CertificateService + ObjectStorageService + DnsService + 'static,
    {
        Self {
            cdn: backend.clone(),
            certificates: backend.clone(),
            storage: backend.clone(),
            dns: backend,
        }
    }
}

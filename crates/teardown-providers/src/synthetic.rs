// ABOUTME: In-memory cloud implementing every service trait for tests and rehearsals
// ABOUTME: Simulates ETags, deployment propagation, paging, and service-side refusals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning is reported as CloudError::Api so callers see an ordinary
// service failure instead of a panic.

//! # Synthetic Cloud
//!
//! A deterministic stand-in for the four managed services. It enforces the
//! same rules the real services do where the teardown depends on them:
//!
//! - Distribution updates and deletes are conditional on the current ETag
//! - An update leaves the distribution `InProgress` for a configurable number
//!   of list calls before it reports `Deployed`
//! - A distribution can only be deleted once disabled and deployed
//! - A certificate still attached to a distribution cannot be deleted
//! - A bucket must be empty before it is deleted; listings are paged
//! - A record delete must match an existing record exactly
//! - A hosted zone can only be deleted once only NS and SOA records remain
//!
//! Every call is appended to a call log so tests can assert ordering, and a
//! single failure can be injected per operation name.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::constants::{resources, services};
use crate::core::{CdnService, CertificateService, DnsService, ObjectStorageService};
use crate::errors::{CloudError, CloudResult};
use crate::models::{
    CertificateSummary, ChangeAction, ChangeInfo, DeploymentStatus, DistributionConfigSnapshot,
    DistributionSummary, HostedZone, ObjectPage, ObjectSummary, RecordChange,
    RecordRouting, RecordSet, RecordType, ViewerCertificate,
};

/// Behaviour knobs for the synthetic cloud
#[derive(Debug, Clone, Copy)]
pub struct SyntheticSettings {
    /// List calls a distribution stays `InProgress` after each update
    pub deploy_polls: u32,
    /// Objects returned per listing page
    pub page_size: usize,
}

impl Default for SyntheticSettings {
    fn default() -> Self {
        Self {
            deploy_polls: 2,
            page_size: 1000,
        }
    }
}

#[derive(Debug, Clone)]
struct SyntheticDistribution {
    summary: DistributionSummary,
    config: DistributionConfigSnapshot,
    pending_polls: u32,
    /// List calls that still include the distribution before it disappears
    listed_polls_left: Option<u32>,
}

#[derive(Debug, Clone)]
struct SyntheticZone {
    zone: HostedZone,
    records: Vec<RecordSet>,
}

#[derive(Debug, Default)]
struct CloudState {
    distributions: BTreeMap<String, SyntheticDistribution>,
    certificates: Vec<CertificateSummary>,
    buckets: BTreeMap<String, BTreeMap<String, ObjectSummary>>,
    zones: Vec<SyntheticZone>,
    failures: HashMap<&'static str, CloudError>,
    calls: Vec<String>,
    etag_counter: u64,
    change_counter: u64,
}

impl CloudState {
    fn next_etag(&mut self) -> String {
        self.etag_counter += 1;
        format!("ETAG{:04}", self.etag_counter)
    }

    /// Record the call and surface an injected failure, if any
    fn enter(&mut self, operation: &'static str, target: &str) -> CloudResult<()> {
        self.calls.push(format!("{operation}:{target}"));
        self.failures.remove(operation).map_or(Ok(()), Err)
    }

    fn distribution_mut(&mut self, id: &str) -> CloudResult<&mut SyntheticDistribution> {
        self.distributions
            .get_mut(id)
            .ok_or_else(|| CloudError::not_found(services::CLOUDFRONT, resources::DISTRIBUTION, id))
    }

    fn zone_mut(&mut self, zone_id: &str) -> CloudResult<&mut SyntheticZone> {
        let bare = zone_id.rsplit('/').next().unwrap_or(zone_id);
        self.zones
            .iter_mut()
            .find(|z| z.zone.bare_id() == bare)
            .ok_or_else(|| CloudError::not_found(services::ROUTE53, resources::HOSTED_ZONE, zone_id))
    }

    fn certificate_in_use(&self, arn: &str) -> bool {
        self.distributions
            .values()
            .any(|d| d.config.viewer_certificate.acm_certificate_arn() == Some(arn))
    }
}

/// In-memory implementation of every service trait
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use teardown_providers::{CloudServices, SyntheticCloud};
///
/// let cloud = Arc::new(SyntheticCloud::new());
/// cloud.add_distribution("E1", &["example.com"], Some("arn:aws:acm:us-east-1:1:certificate/c1"));
/// cloud.add_bucket("example-site", &["index.html"]);
/// let services = CloudServices::from_single(cloud);
/// ```
#[derive(Debug, Default)]
pub struct SyntheticCloud {
    state: RwLock<CloudState>,
    settings: SyntheticSettings,
}

impl SyntheticCloud {
    /// Empty cloud with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cloud with custom settings
    #[must_use]
    pub fn with_settings(settings: SyntheticSettings) -> Self {
        Self {
            state: RwLock::default(),
            settings,
        }
    }

    fn read(&self) -> CloudResult<RwLockReadGuard<'_, CloudState>> {
        self.state
            .read()
            .map_err(|_| CloudError::api("synthetic", "lock", "state lock poisoned"))
    }

    fn write(&self) -> CloudResult<RwLockWriteGuard<'_, CloudState>> {
        self.state
            .write()
            .map_err(|_| CloudError::api("synthetic", "lock", "state lock poisoned"))
    }

    fn seed(&self, apply: impl FnOnce(&mut CloudState)) {
        if let Ok(mut state) = self.state.write() {
            apply(&mut state);
        }
    }

    // Seeding

    /// Add an enabled, deployed distribution serving `aliases`
    pub fn add_distribution(&self, id: &str, aliases: &[&str], certificate_arn: Option<&str>) {
        self.seed(|state| {
            let etag = state.next_etag();
            let aliases: Vec<String> = aliases.iter().map(|a| (*a).to_owned()).collect();
            let viewer_certificate = certificate_arn.map_or(ViewerCertificate::CloudFrontDefault, |arn| {
                ViewerCertificate::Acm {
                    certificate_arn: arn.to_owned(),
                }
            });
            state.distributions.insert(
                id.to_owned(),
                SyntheticDistribution {
                    summary: DistributionSummary {
                        id: id.to_owned(),
                        domain_name: format!("{}.cloudfront.net", id.to_ascii_lowercase()),
                        aliases: aliases.clone(),
                        enabled: true,
                        status: DeploymentStatus::Deployed,
                    },
                    config: DistributionConfigSnapshot {
                        etag,
                        enabled: true,
                        aliases,
                        viewer_certificate,
                    },
                    pending_polls: 0,
                    listed_polls_left: None,
                },
            );
        });
    }

    /// Drop distribution `id` from listings after `polls` more list calls,
    /// as if it were deleted out of band
    pub fn remove_distribution_after(&self, id: &str, polls: u32) {
        self.seed(|state| {
            if let Some(dist) = state.distributions.get_mut(id) {
                dist.listed_polls_left = Some(polls);
            }
        });
    }

    /// Add a certificate issued for `domain`
    pub fn add_certificate(&self, arn: &str, domain: &str) {
        self.seed(|state| {
            state.certificates.push(CertificateSummary {
                arn: arn.to_owned(),
                domain_name: domain.to_owned(),
                in_use: None,
            });
        });
    }

    /// Add a bucket holding `keys`
    pub fn add_bucket(&self, name: &str, keys: &[&str]) {
        self.seed(|state| {
            let objects = keys
                .iter()
                .map(|key| {
                    (
                        (*key).to_owned(),
                        ObjectSummary {
                            key: (*key).to_owned(),
                        },
                    )
                })
                .collect();
            state.buckets.insert(name.to_owned(), objects);
        });
    }

    /// Add a hosted zone with its NS and SOA records; returns the zone id
    pub fn add_hosted_zone(&self, name: &str) -> String {
        let apex = teardown_core::models::fqdn(name);
        let mut zone_id = String::new();
        self.seed(|state| {
            let id = format!("/hostedzone/Z{:05}", state.zones.len() + 1);
            zone_id.clone_from(&id);
            let records = vec![
                simple_record(&apex, RecordType::Ns, "ns-1.awsdns-00.org."),
                simple_record(&apex, RecordType::Soa, "ns-1.awsdns-00.org. hostmaster. 1 7200 900 1209600 86400"),
            ];
            state.zones.push(SyntheticZone {
                zone: HostedZone {
                    id,
                    name: apex,
                    record_count: Some(2),
                },
                records,
            });
        });
        zone_id
    }

    /// Add a record to an existing zone
    pub fn add_record(&self, zone_id: &str, record: RecordSet) {
        self.seed(|state| {
            if let Ok(zone) = state.zone_mut(zone_id) {
                zone.records.push(record);
                zone.zone.record_count = Some(zone.records.len() as i64);
            }
        });
    }

    /// Make the next call to `operation` fail with `error`
    pub fn fail_next(&self, operation: &'static str, error: CloudError) {
        self.seed(|state| {
            state.failures.insert(operation, error);
        });
    }

    // Inspection

    /// Every call made so far, as `Operation:target`
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.read().map(|s| s.calls.clone()).unwrap_or_default()
    }

    /// Current summary of a distribution
    #[must_use]
    pub fn distribution(&self, id: &str) -> Option<DistributionSummary> {
        self.read()
            .ok()
            .and_then(|s| s.distributions.get(id).map(|d| d.summary.clone()))
    }

    /// Current configuration of a distribution
    #[must_use]
    pub fn distribution_config(&self, id: &str) -> Option<DistributionConfigSnapshot> {
        self.read()
            .ok()
            .and_then(|s| s.distributions.get(id).map(|d| d.config.clone()))
    }

    /// Whether a certificate with `arn` exists
    #[must_use]
    pub fn has_certificate(&self, arn: &str) -> bool {
        self.read()
            .map(|s| s.certificates.iter().any(|c| c.arn == arn))
            .unwrap_or(false)
    }

    /// Whether the bucket exists
    #[must_use]
    pub fn has_bucket(&self, name: &str) -> bool {
        self.read()
            .map(|s| s.buckets.contains_key(name))
            .unwrap_or(false)
    }

    /// Objects remaining in a bucket
    #[must_use]
    pub fn object_count(&self, name: &str) -> usize {
        self.read()
            .ok()
            .and_then(|s| s.buckets.get(name).map(BTreeMap::len))
            .unwrap_or(0)
    }

    /// Records currently in a zone
    #[must_use]
    pub fn records(&self, zone_id: &str) -> Vec<RecordSet> {
        self.write()
            .ok()
            .and_then(|mut s| s.zone_mut(zone_id).ok().map(|z| z.records.clone()))
            .unwrap_or_default()
    }

    /// Whether the zone exists
    #[must_use]
    pub fn has_hosted_zone(&self, zone_id: &str) -> bool {
        self.write()
            .map(|mut s| s.zone_mut(zone_id).is_ok())
            .unwrap_or(false)
    }
}

/// A single-value record with a 300s TTL
#[must_use]
pub fn simple_record(name: &str, record_type: RecordType, value: &str) -> RecordSet {
    RecordSet {
        name: teardown_core::models::fqdn(name),
        record_type,
        ttl: Some(300),
        values: vec![value.to_owned()],
        alias_target: None,
        routing: RecordRouting::default(),
    }
}

#[async_trait]
impl CdnService for SyntheticCloud {
    async fn list_distributions(&self) -> CloudResult<Vec<DistributionSummary>> {
        let mut state = self.write()?;
        state.enter("ListDistributions", "*")?;
        state
            .distributions
            .retain(|_, dist| dist.listed_polls_left != Some(0));
        let mut summaries = Vec::with_capacity(state.distributions.len());
        for dist in state.distributions.values_mut() {
            if dist.pending_polls > 0 {
                dist.pending_polls -= 1;
                dist.summary.status = DeploymentStatus::InProgress;
            } else {
                dist.summary.status = DeploymentStatus::Deployed;
            }
            if let Some(left) = dist.listed_polls_left.as_mut() {
                *left -= 1;
            }
            summaries.push(dist.summary.clone());
        }
        Ok(summaries)
    }

    async fn get_distribution_config(&self, id: &str) -> CloudResult<DistributionConfigSnapshot> {
        let mut state = self.write()?;
        state.enter("GetDistributionConfig", id)?;
        Ok(state.distribution_mut(id)?.config.clone())
    }

    async fn update_distribution(
        &self,
        id: &str,
        config: &DistributionConfigSnapshot,
    ) -> CloudResult<String> {
        let deploy_polls = self.settings.deploy_polls;
        let mut state = self.write()?;
        state.enter("UpdateDistribution", id)?;
        let etag = state.next_etag();
        let dist = state.distribution_mut(id)?;
        if dist.config.etag != config.etag {
            return Err(CloudError::precondition_failed(
                services::CLOUDFRONT,
                resources::DISTRIBUTION,
                id,
            ));
        }
        dist.config = DistributionConfigSnapshot {
            etag: etag.clone(),
            ..config.clone()
        };
        dist.summary.enabled = config.enabled;
        dist.summary.aliases.clone_from(&config.aliases);
        dist.summary.status = DeploymentStatus::InProgress;
        dist.pending_polls = deploy_polls;
        debug!(distribution.id = %id, etag = %etag, "synthetic distribution updated");
        Ok(etag)
    }

    async fn delete_distribution(&self, id: &str, etag: &str) -> CloudResult<()> {
        let mut state = self.write()?;
        state.enter("DeleteDistribution", id)?;
        let dist = state.distribution_mut(id)?;
        if dist.config.etag != etag {
            return Err(CloudError::precondition_failed(
                services::CLOUDFRONT,
                resources::DISTRIBUTION,
                id,
            ));
        }
        if dist.config.enabled || dist.pending_polls > 0 {
            return Err(CloudError::api(
                services::CLOUDFRONT,
                "DeleteDistribution",
                "DistributionNotDisabled: the distribution must be disabled and deployed",
            ));
        }
        state.distributions.remove(id);
        Ok(())
    }
}

#[async_trait]
impl CertificateService for SyntheticCloud {
    async fn list_certificates(&self) -> CloudResult<Vec<CertificateSummary>> {
        let mut state = self.write()?;
        state.enter("ListCertificates", "*")?;
        let certificates = state
            .certificates
            .iter()
            .map(|c| CertificateSummary {
                in_use: Some(state.certificate_in_use(&c.arn)),
                ..c.clone()
            })
            .collect();
        Ok(certificates)
    }

    async fn delete_certificate(&self, arn: &str) -> CloudResult<()> {
        let mut state = self.write()?;
        state.enter("DeleteCertificate", arn)?;
        if state.certificate_in_use(arn) {
            return Err(CloudError::api(
                services::ACM,
                "DeleteCertificate",
                format!("ResourceInUseException: certificate {arn} is in use"),
            ));
        }
        let before = state.certificates.len();
        state.certificates.retain(|c| c.arn != arn);
        if state.certificates.len() == before {
            return Err(CloudError::not_found(services::ACM, resources::CERTIFICATE, arn));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorageService for SyntheticCloud {
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
    ) -> CloudResult<ObjectPage> {
        let page_size = self.settings.page_size.max(1);
        let mut state = self.write()?;
        state.enter("ListObjectsV2", bucket)?;
        let objects = state
            .buckets
            .get(bucket)
            .ok_or_else(|| CloudError::not_found(services::S3, resources::BUCKET, bucket))?;

        // The continuation token is the last key of the previous page
        let remaining: Vec<&ObjectSummary> = objects
            .values()
            .filter(|o| continuation_token.map_or(true, |token| o.key.as_str() > token))
            .collect();
        let is_truncated = remaining.len() > page_size;
        let page: Vec<ObjectSummary> = remaining.into_iter().take(page_size).cloned().collect();
        let next_continuation_token = if is_truncated {
            page.last().map(|o| o.key.clone())
        } else {
            None
        };
        Ok(ObjectPage {
            objects: page,
            is_truncated,
            next_continuation_token,
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> CloudResult<()> {
        let mut state = self.write()?;
        state.enter("DeleteObject", &format!("{bucket}/{key}"))?;
        // Deleting a missing key succeeds, as it does on the real service
        state
            .buckets
            .get_mut(bucket)
            .ok_or_else(|| CloudError::not_found(services::S3, resources::BUCKET, bucket))?
            .remove(key);
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> CloudResult<()> {
        let mut state = self.write()?;
        state.enter("DeleteBucket", bucket)?;
        let objects = state
            .buckets
            .get(bucket)
            .ok_or_else(|| CloudError::not_found(services::S3, resources::BUCKET, bucket))?;
        if !objects.is_empty() {
            return Err(CloudError::api(
                services::S3,
                "DeleteBucket",
                format!("BucketNotEmpty: {} objects remain", objects.len()),
            ));
        }
        state.buckets.remove(bucket);
        Ok(())
    }
}

#[async_trait]
impl DnsService for SyntheticCloud {
    async fn list_hosted_zones_by_name(&self, dns_name: &str) -> CloudResult<Vec<HostedZone>> {
        let mut state = self.write()?;
        state.enter("ListHostedZonesByName", dns_name)?;
        let start = teardown_core::models::fqdn(dns_name).to_ascii_lowercase();
        let mut zones: Vec<HostedZone> = state
            .zones
            .iter()
            .map(|z| z.zone.clone())
            .filter(|z| z.name.to_ascii_lowercase() >= start)
            .collect();
        zones.sort_by_key(|z| z.name.to_ascii_lowercase());
        Ok(zones)
    }

    async fn list_resource_record_sets(&self, zone_id: &str) -> CloudResult<Vec<RecordSet>> {
        let mut state = self.write()?;
        state.enter("ListResourceRecordSets", zone_id)?;
        Ok(state.zone_mut(zone_id)?.records.clone())
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[RecordChange],
    ) -> CloudResult<ChangeInfo> {
        let mut state = self.write()?;
        state.enter("ChangeResourceRecordSets", zone_id)?;
        state.change_counter += 1;
        let change_id = format!("/change/C{:05}", state.change_counter);
        let zone = state.zone_mut(zone_id)?;

        // The batch is atomic: validate every change before applying any
        for change in changes {
            if !zone.records.contains(&change.record_set) {
                return Err(CloudError::api(
                    services::ROUTE53,
                    "ChangeResourceRecordSets",
                    format!(
                        "InvalidChangeBatch: {} {} {} not found",
                        change.action.as_str(),
                        change.record_set.record_type,
                        change.record_set.name
                    ),
                ));
            }
        }
        for change in changes {
            match change.action {
                ChangeAction::Delete => zone.records.retain(|r| r != &change.record_set),
            }
        }
        zone.zone.record_count = Some(zone.records.len() as i64);
        Ok(ChangeInfo {
            id: change_id,
            status: "PENDING".to_owned(),
        })
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> CloudResult<()> {
        let mut state = self.write()?;
        state.enter("DeleteHostedZone", zone_id)?;
        let zone = state.zone_mut(zone_id)?;
        let blocking = zone
            .records
            .iter()
            .filter(|r| !matches!(r.record_type, RecordType::Ns | RecordType::Soa))
            .count();
        if blocking > 0 {
            return Err(CloudError::api(
                services::ROUTE53,
                "DeleteHostedZone",
                format!("HostedZoneNotEmpty: {blocking} records remain"),
            ));
        }
        let bare = zone.zone.bare_id().to_owned();
        state.zones.retain(|z| z.zone.bare_id() != bare);
        Ok(())
    }
}

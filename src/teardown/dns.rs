// ABOUTME: DNS step: remove the apex and www A/CNAME records from the domain's hosted zone
// ABOUTME: Record selection is a pure function so it can be tested without a zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::{debug, info};

use super::Teardown;
use crate::errors::AppResult;
use crate::models::{fqdn, HostedZone, RecordChange, RecordSet, RecordType};

/// A and CNAME records named exactly `domain.` or `www.domain.`
#[must_use]
pub fn select_site_records(records: &[RecordSet], domain: &str) -> Vec<RecordSet> {
    let apex = fqdn(domain);
    let www = fqdn(&format!("{}.{domain}", crate::constants::dns::WWW_LABEL));
    records
        .iter()
        .filter(|r| matches!(r.record_type, RecordType::A | RecordType::Cname))
        .filter(|r| r.has_name(&apex) || r.has_name(&www))
        .cloned()
        .collect()
}

impl Teardown {
    /// The zone whose apex is the domain; the listing starts at the domain,
    /// so only its first entry can match
    pub(crate) async fn find_hosted_zone(&self) -> AppResult<Option<HostedZone>> {
        let domain = &self.config.domain;
        let zones = self.services.dns.list_hosted_zones_by_name(domain).await?;
        Ok(zones.into_iter().next().filter(|z| z.is_zone_for(domain)))
    }

    /// Delete the site records in one batch; returns how many were deleted
    pub(crate) async fn delete_dns_records(&self, zone: &HostedZone) -> AppResult<usize> {
        let records = self.services.dns.list_resource_record_sets(&zone.id).await?;
        let selected = select_site_records(&records, &self.config.domain);
        if selected.is_empty() {
            info!(zone.id = %zone.id, "No A or CNAME records to delete in {}", zone.name);
            return Ok(0);
        }

        for record in &selected {
            info!(
                record.name = %record.name,
                record.kind = %record.record_type,
                "Deleting DNS record: {} {}",
                record.record_type,
                record.name
            );
        }
        let count = selected.len();
        let changes: Vec<RecordChange> = selected.into_iter().map(RecordChange::delete).collect();
        let change = self
            .services
            .dns
            .change_resource_record_sets(&zone.id, &changes)
            .await?;
        debug!(change.id = %change.id, change.status = %change.status, "Change batch submitted");
        Ok(count)
    }

    pub(crate) async fn delete_hosted_zone(&self, zone: &HostedZone) -> AppResult<()> {
        info!(zone.id = %zone.id, "Deleting hosted zone: {}", zone.name);
        self.services.dns.delete_hosted_zone(&zone.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AliasTarget, RecordRouting};

    fn record(name: &str, record_type: RecordType) -> RecordSet {
        RecordSet {
            name: name.to_owned(),
            record_type,
            ttl: Some(300),
            values: vec!["192.0.2.1".to_owned()],
            alias_target: None,
            routing: RecordRouting::default(),
        }
    }

    #[test]
    fn test_selects_apex_and_www_address_records() {
        let mut alias = record("example.com.", RecordType::A);
        alias.ttl = None;
        alias.values.clear();
        alias.alias_target = Some(AliasTarget {
            hosted_zone_id: "Z2FDTNDATAQYW2".to_owned(),
            dns_name: "d1.cloudfront.net.".to_owned(),
            evaluate_target_health: false,
        });
        let records = vec![
            record("example.com.", RecordType::Ns),
            record("example.com.", RecordType::Soa),
            alias.clone(),
            record("www.example.com.", RecordType::Cname),
            record("api.example.com.", RecordType::A),
            record("example.com.", RecordType::Txt),
            record("example.com.", RecordType::Aaaa),
        ];
        let selected = select_site_records(&records, "example.com");
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0], alias);
        assert_eq!(selected[1].name, "www.example.com.");
    }

    #[test]
    fn test_selection_requires_full_name_match() {
        let records = vec![
            record("example.com.au.", RecordType::A),
            record("wwwexample.com.", RecordType::A),
            record("WWW.Example.com.", RecordType::Cname),
        ];
        let selected = select_site_records(&records, "example.com");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "WWW.Example.com.");
    }
}

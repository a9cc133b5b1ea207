// ABOUTME: Route 53 implementation of the DNS service trait
// ABOUTME: Converts record sets to and from SDK types so deletes repeat records exactly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use aws_sdk_route53::error::BuildError;
use aws_sdk_route53::types::{
    AliasTarget as SdkAliasTarget, Change, ChangeAction as SdkChangeAction, ChangeBatch,
    CidrRoutingConfig, Coordinates as SdkCoordinates, GeoLocation as SdkGeoLocation,
    GeoProximityLocation as SdkGeoProximityLocation, ResourceRecord, ResourceRecordSet,
    ResourceRecordSetFailover, ResourceRecordSetRegion, RrType,
};
use aws_sdk_route53::Client;

use super::ErrorMapping;
use crate::constants::{resources, services};
use crate::core::DnsService;
use crate::errors::{CloudError, CloudResult};
use crate::models::{
    AliasTarget, ChangeAction, ChangeInfo, CidrRouting, Coordinates, GeoLocation,
    GeoProximityLocation, HostedZone, RecordChange, RecordRouting, RecordSet, RecordType,
};

const NOT_FOUND_CODES: &[&str] = &["NoSuchHostedZone"];

/// DNS service backed by Route 53
pub struct Route53Dns {
    client: Client,
}

impl Route53Dns {
    /// Wrap an SDK client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    fn mapping<'a>(operation: &'static str, id: &'a str) -> ErrorMapping<'a> {
        ErrorMapping {
            service: services::ROUTE53,
            operation,
            resource: resources::HOSTED_ZONE,
            id,
            not_found_codes: NOT_FOUND_CODES,
        }
    }
}

fn record_from_sdk(record: &ResourceRecordSet) -> RecordSet {
    RecordSet {
        name: record.name().to_owned(),
        record_type: RecordType::parse(record.r#type().as_str()),
        ttl: record.ttl(),
        values: record
            .resource_records()
            .iter()
            .map(|r| r.value().to_owned())
            .collect(),
        alias_target: record.alias_target().map(|target| AliasTarget {
            hosted_zone_id: target.hosted_zone_id().to_owned(),
            dns_name: target.dns_name().to_owned(),
            evaluate_target_health: target.evaluate_target_health(),
        }),
        routing: routing_from_sdk(record),
    }
}

fn routing_from_sdk(record: &ResourceRecordSet) -> RecordRouting {
    RecordRouting {
        set_identifier: record.set_identifier().map(str::to_owned),
        weight: record.weight(),
        region: record.region().map(|r| r.as_str().to_owned()),
        failover: record.failover().map(|f| f.as_str().to_owned()),
        geo_location: record.geo_location().map(|geo| GeoLocation {
            continent_code: geo.continent_code().map(str::to_owned),
            country_code: geo.country_code().map(str::to_owned),
            subdivision_code: geo.subdivision_code().map(str::to_owned),
        }),
        geo_proximity_location: record.geo_proximity_location().map(|geo| GeoProximityLocation {
            aws_region: geo.aws_region().map(str::to_owned),
            local_zone_group: geo.local_zone_group().map(str::to_owned),
            coordinates: geo.coordinates().map(|c| Coordinates {
                latitude: c.latitude().to_owned(),
                longitude: c.longitude().to_owned(),
            }),
            bias: geo.bias(),
        }),
        multi_value_answer: record.multi_value_answer(),
        health_check_id: record.health_check_id().map(str::to_owned),
        cidr_routing_config: record.cidr_routing_config().map(|cidr| CidrRouting {
            collection_id: cidr.collection_id().to_owned(),
            location_name: cidr.location_name().to_owned(),
        }),
        traffic_policy_instance_id: record.traffic_policy_instance_id().map(str::to_owned),
    }
}

fn record_to_sdk(record: &RecordSet) -> Result<ResourceRecordSet, BuildError> {
    let values = if record.values.is_empty() {
        None
    } else {
        Some(
            record
                .values
                .iter()
                .map(|value| ResourceRecord::builder().value(value).build())
                .collect::<Result<Vec<_>, _>>()?,
        )
    };
    let alias_target = record
        .alias_target
        .as_ref()
        .map(|target| {
            SdkAliasTarget::builder()
                .hosted_zone_id(&target.hosted_zone_id)
                .dns_name(&target.dns_name)
                .evaluate_target_health(target.evaluate_target_health)
                .build()
        })
        .transpose()?;

    let routing = &record.routing;
    let geo_location = routing.geo_location.as_ref().map(|geo| {
        SdkGeoLocation::builder()
            .set_continent_code(geo.continent_code.clone())
            .set_country_code(geo.country_code.clone())
            .set_subdivision_code(geo.subdivision_code.clone())
            .build()
    });
    let geo_proximity_location = routing
        .geo_proximity_location
        .as_ref()
        .map(|geo| {
            let coordinates = geo
                .coordinates
                .as_ref()
                .map(|c| {
                    SdkCoordinates::builder()
                        .latitude(&c.latitude)
                        .longitude(&c.longitude)
                        .build()
                })
                .transpose()?;
            Ok::<_, BuildError>(
                SdkGeoProximityLocation::builder()
                    .set_aws_region(geo.aws_region.clone())
                    .set_local_zone_group(geo.local_zone_group.clone())
                    .set_coordinates(coordinates)
                    .set_bias(geo.bias)
                    .build(),
            )
        })
        .transpose()?;
    let cidr_routing_config = routing
        .cidr_routing_config
        .as_ref()
        .map(|cidr| {
            CidrRoutingConfig::builder()
                .collection_id(&cidr.collection_id)
                .location_name(&cidr.location_name)
                .build()
        })
        .transpose()?;

    ResourceRecordSet::builder()
        .name(&record.name)
        .r#type(RrType::from(record.record_type.as_str()))
        .set_ttl(record.ttl)
        .set_resource_records(values)
        .set_alias_target(alias_target)
        .set_set_identifier(routing.set_identifier.clone())
        .set_weight(routing.weight)
        .set_region(routing.region.as_deref().map(ResourceRecordSetRegion::from))
        .set_failover(routing.failover.as_deref().map(ResourceRecordSetFailover::from))
        .set_geo_location(geo_location)
        .set_geo_proximity_location(geo_proximity_location)
        .set_multi_value_answer(routing.multi_value_answer)
        .set_health_check_id(routing.health_check_id.clone())
        .set_cidr_routing_config(cidr_routing_config)
        .set_traffic_policy_instance_id(routing.traffic_policy_instance_id.clone())
        .build()
}

fn change_batch(changes: &[RecordChange]) -> Result<ChangeBatch, BuildError> {
    let changes = changes
        .iter()
        .map(|change| {
            let action = match change.action {
                ChangeAction::Delete => SdkChangeAction::Delete,
            };
            Change::builder()
                .action(action)
                .resource_record_set(record_to_sdk(&change.record_set)?)
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;
    ChangeBatch::builder().set_changes(Some(changes)).build()
}

#[async_trait]
impl DnsService for Route53Dns {
    async fn list_hosted_zones_by_name(&self, dns_name: &str) -> CloudResult<Vec<HostedZone>> {
        let output = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(dns_name)
            .send()
            .await
            .map_err(|e| Self::mapping("ListHostedZonesByName", dns_name).map(&e))?;
        Ok(output
            .hosted_zones()
            .iter()
            .map(|zone| HostedZone {
                id: zone.id().to_owned(),
                name: zone.name().to_owned(),
                record_count: zone.resource_record_set_count(),
            })
            .collect())
    }

    async fn list_resource_record_sets(&self, zone_id: &str) -> CloudResult<Vec<RecordSet>> {
        let mut records = Vec::new();
        let mut start_name: Option<String> = None;
        let mut start_type: Option<RrType> = None;
        let mut start_identifier: Option<String> = None;
        loop {
            let output = self
                .client
                .list_resource_record_sets()
                .hosted_zone_id(zone_id)
                .set_start_record_name(start_name.take())
                .set_start_record_type(start_type.take())
                .set_start_record_identifier(start_identifier.take())
                .send()
                .await
                .map_err(|e| Self::mapping("ListResourceRecordSets", zone_id).map(&e))?;

            records.extend(output.resource_record_sets().iter().map(record_from_sdk));

            // Next-record fields are only returned for truncated listings
            match output.next_record_name() {
                Some(name) => {
                    start_name = Some(name.to_owned());
                    start_type = output.next_record_type().cloned();
                    start_identifier = output.next_record_identifier().map(str::to_owned);
                }
                None => break,
            }
        }
        Ok(records)
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[RecordChange],
    ) -> CloudResult<ChangeInfo> {
        let batch = change_batch(changes).map_err(|e| {
            CloudError::api(
                services::ROUTE53,
                "ChangeResourceRecordSets",
                format!("invalid change batch: {e}"),
            )
        })?;
        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| Self::mapping("ChangeResourceRecordSets", zone_id).map(&e))?;
        let info = output.change_info().ok_or_else(|| {
            CloudError::invalid_response(services::ROUTE53, "missing ChangeInfo")
        })?;
        Ok(ChangeInfo {
            id: info.id().to_owned(),
            status: info.status().as_str().to_owned(),
        })
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> CloudResult<()> {
        self.client
            .delete_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| Self::mapping("DeleteHostedZone", zone_id).map(&e))?;
        Ok(())
    }
}

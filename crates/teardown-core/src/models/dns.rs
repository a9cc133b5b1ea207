// ABOUTME: DNS models: hosted zones, record sets, change batches, and change status
// ABOUTME: Record names are fully qualified with a trailing dot, as the DNS service returns them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::dns::DELETE_ACTION;

/// Fully qualified form of a domain name (`example.com` → `example.com.`)
#[must_use]
pub fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_owned()
    } else {
        format!("{domain}.")
    }
}

/// A DNS hosted zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Zone id (`/hostedzone/Z123...` or bare `Z123...`)
    pub id: String,
    /// Zone apex, fully qualified
    pub name: String,
    /// Number of record sets, when reported
    pub record_count: Option<i64>,
}

impl HostedZone {
    /// Whether the zone apex is exactly `domain`
    #[must_use]
    pub fn is_zone_for(&self, domain: &str) -> bool {
        self.name.eq_ignore_ascii_case(&fqdn(domain))
    }

    /// Zone id without the `/hostedzone/` prefix
    #[must_use]
    pub fn bare_id(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}

/// DNS record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Mail exchanger
    Mx,
    /// Name server
    Ns,
    /// Start of authority
    Soa,
    /// Text
    Txt,
    /// Any other type, kept verbatim
    Other(String),
}

impl RecordType {
    /// Parse the type string used by the DNS service
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "NS" => Self::Ns,
            "SOA" => Self::Soa,
            "TXT" => Self::Txt,
            _ => Self::Other(value.to_owned()),
        }
    }

    /// Type string as the DNS service spells it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Txt => "TXT",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target of an alias record (e.g. a CDN distribution)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTarget {
    /// Hosted zone of the target
    pub hosted_zone_id: String,
    /// DNS name of the target
    pub dns_name: String,
    /// Whether target health is evaluated
    pub evaluate_target_health: bool,
}

/// Geolocation routing key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Two-letter continent code
    pub continent_code: Option<String>,
    /// Two-letter country code, `*` for the default location
    pub country_code: Option<String>,
    /// Subdivision (state or province) code
    pub subdivision_code: Option<String>,
}

/// Latitude and longitude, kept as the decimal strings the service returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude
    pub latitude: String,
    /// Longitude
    pub longitude: String,
}

/// Geoproximity routing key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoProximityLocation {
    /// Region of the resource
    pub aws_region: Option<String>,
    /// Local Zone group of the resource
    pub local_zone_group: Option<String>,
    /// Location of a non-AWS resource
    pub coordinates: Option<Coordinates>,
    /// Bias that grows or shrinks the routed area
    pub bias: Option<i32>,
}

/// IP-based routing key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidrRouting {
    /// CIDR collection id
    pub collection_id: String,
    /// Location within the collection
    pub location_name: String,
}

/// Routing-policy fields of a record set
///
/// All empty for a simple record. Weighted, latency, failover, geolocation,
/// geoproximity, multivalue, and IP-based records fill in their own subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRouting {
    /// Distinguishes records sharing a name and type
    pub set_identifier: Option<String>,
    /// Weight for weighted routing
    pub weight: Option<i64>,
    /// Region for latency routing
    pub region: Option<String>,
    /// `PRIMARY` or `SECONDARY` for failover routing
    pub failover: Option<String>,
    /// Geolocation routing key
    pub geo_location: Option<GeoLocation>,
    /// Geoproximity routing key
    pub geo_proximity_location: Option<GeoProximityLocation>,
    /// Multivalue answer routing
    pub multi_value_answer: Option<bool>,
    /// Health check attached to the record
    pub health_check_id: Option<String>,
    /// IP-based routing key
    pub cidr_routing_config: Option<CidrRouting>,
    /// Traffic policy instance that created the record
    pub traffic_policy_instance_id: Option<String>,
}

/// A record set as listed by the DNS service
///
/// A delete request must repeat the record exactly, so every field the
/// listing returns is kept, routing-policy fields included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Fully qualified record name
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Time to live, absent for alias records
    pub ttl: Option<i64>,
    /// Record values, empty for alias records
    pub values: Vec<String>,
    /// Alias target, for alias records
    pub alias_target: Option<AliasTarget>,
    /// Routing-policy fields
    #[serde(default)]
    pub routing: RecordRouting,
}

impl RecordSet {
    /// Whether the record name equals the fully qualified `name`
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Change applied to a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Remove the record set
    Delete,
}

impl ChangeAction {
    /// Action string as the DNS service spells it
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => DELETE_ACTION,
        }
    }
}

/// One entry of a change batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordChange {
    /// What to do
    pub action: ChangeAction,
    /// Record to do it to
    pub record_set: RecordSet,
}

impl RecordChange {
    /// Delete `record_set`
    #[must_use]
    pub const fn delete(record_set: RecordSet) -> Self {
        Self {
            action: ChangeAction::Delete,
            record_set,
        }
    }
}

/// Status of a submitted change batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeInfo {
    /// Change id
    pub id: String,
    /// `PENDING` or `INSYNC`
    pub status: String,
}

// ABOUTME: Cloud resource models shared by providers and the teardown workflow
// ABOUTME: Re-exports distribution, certificate, storage, and DNS record types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Provider-agnostic views of the four resource families the teardown touches.
//! Only the fields the workflow reads or writes back are modelled; SDK types
//! stay inside the provider crate.

mod cdn;
mod certificate;
mod dns;
mod storage;

pub use cdn::{DeploymentStatus, DistributionConfigSnapshot, DistributionSummary, ViewerCertificate};
pub use certificate::CertificateSummary;
pub use dns::{
    fqdn, AliasTarget, ChangeAction, ChangeInfo, CidrRouting, Coordinates, GeoLocation,
    GeoProximityLocation, HostedZone, RecordChange, RecordRouting, RecordSet, RecordType,
};
pub use storage::{ObjectPage, ObjectSummary};

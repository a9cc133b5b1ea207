// ABOUTME: Cloud service clients for CDN, certificate, object storage, and DNS operations
// ABOUTME: Service traits, AWS SDK implementations, and an in-memory synthetic cloud
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cloud service implementations and core abstractions.
//!
//! The teardown workflow talks to four services through the traits in
//! [`core`]. Real calls go through the AWS SDK (feature `aws`); tests and
//! local rehearsals use [`synthetic::SyntheticCloud`].

// Re-export teardown-core modules so service code can `use crate::errors::*`
pub use teardown_core::constants;
pub use teardown_core::errors;
pub use teardown_core::models;

/// Service traits and the bundle handed to the workflow
pub mod core;
/// In-memory cloud for tests and rehearsals
pub mod synthetic;

/// AWS SDK backed services
#[cfg(feature = "aws")]
pub mod aws;

pub use core::{CdnService, CertificateService, CloudServices, DnsService, ObjectStorageService};
pub use synthetic::{SyntheticCloud, SyntheticSettings};
pub use teardown_core::errors::{CloudError, CloudResult};

#[cfg(feature = "aws")]
pub use aws::{AwsRegions, AwsServices};

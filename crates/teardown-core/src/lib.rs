// ABOUTME: Core types and constants for the single-domain hosting stack teardown tool
// ABOUTME: Foundation crate with error handling, constants, and cloud resource models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Teardown Core
//!
//! Foundation crate providing the shared types for the teardown workspace.
//! The provider crate and the workflow crate both depend on it, so it carries
//! no SDK types: every cloud resource is described by a plain model here.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the `CloudError` raised by service calls
//! - **constants**: Environment variable names, defaults, and DNS record matching rules
//! - **models**: Distributions, certificates, objects, hosted zones, and record sets

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Cloud resource models shared by providers and the teardown workflow
pub mod models;

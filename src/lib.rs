// ABOUTME: Main library entry point for the stack teardown tool
// ABOUTME: Exposes configuration, logging, and the teardown workflow to the binary and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Stack Teardown
//!
//! Removes a single-domain hosting stack: the CloudFront distribution
//! serving the domain, its ACM certificate, the S3 bucket holding the site,
//! and the Route 53 records pointing at it.
//!
//! ## Architecture
//!
//! - **`teardown-core`**: error types, constants, and service models
//! - **`teardown-providers`**: service traits, AWS SDK clients, and an
//!   in-memory cloud for tests
//! - **This crate**: configuration, logging, and the [`teardown::Teardown`] run
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stack_teardown::config::TeardownConfig;
//! use stack_teardown::errors::AppResult;
//! use stack_teardown::teardown::Teardown;
//! use teardown_providers::{CloudServices, SyntheticCloud};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = TeardownConfig::from_env()?;
//!     let services = CloudServices::from_single(Arc::new(SyntheticCloud::new()));
//!     let report = Teardown::new(config, services).run().await?;
//!     report.log_summary();
//!     Ok(())
//! }
//! ```

/// Environment and command-line configuration
pub mod config;

/// Error types shared with the workspace crates
pub mod errors;

/// Structured logging setup
pub mod logging;

/// The teardown workflow and its report
pub mod teardown;

/// Constants shared with the workspace crates
pub use teardown_core::constants;

/// Service models shared with the workspace crates
pub use teardown_core::models;

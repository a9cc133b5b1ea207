// ABOUTME: Configuration module for a teardown run
// ABOUTME: Re-exports the environment-backed configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and command-line configuration
pub mod environment;

pub use environment::{CliOverrides, PollingConfig, RegionConfig, TeardownConfig};

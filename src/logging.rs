// ABOUTME: Logging configuration and structured logging setup for teardown runs
// ABOUTME: Configures log levels, output format, and quiets AWS SDK and HTTP client targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use anyhow::Result;
use serde_json::json;
use std::env;
use std::fmt as std_fmt;
use std::io;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::constants::services;

/// Targets that log every request at debug level; held at `warn` unless
/// `RUST_LOG` names them explicitly
const NOISY_TARGETS: &[&str] = &[
    "aws_config",
    "aws_smithy_runtime",
    "aws_smithy_runtime_api",
    "aws_sdk_cloudfront",
    "aws_sdk_acm",
    "aws_sdk_s3",
    "aws_sdk_route53",
    "hyper",
    "hyper_util",
    "h2",
    "rustls",
];

const OWN_TARGETS: &[&str] = &["stack_teardown", "teardown_providers"];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for log collectors
    Json,
    /// Pretty format for terminals
    Pretty,
    /// Compact format, one line per event
    Compact,
}

impl std_fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std_fmt::Formatter<'_>) -> std_fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Compact,
            include_location: false,
            service_name: services::STACK_TEARDOWN.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| services::STACK_TEARDOWN.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Force debug output, as `--verbose` does; replaces any `RUST_LOG` level
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.level = "debug".into();
        self
    }

    /// Filter directives: the configured level, our crates at that level when
    /// it is a bare level, SDK and transport targets at `warn` unless named
    fn directives(&self) -> Vec<String> {
        let mut directives = vec![self.level.clone()];
        directives.extend(
            NOISY_TARGETS
                .iter()
                .filter(|target| !self.level.contains(*target))
                .map(|target| format!("{target}=warn")),
        );
        if self.level.parse::<LevelFilter>().is_ok() {
            directives.extend(
                OWN_TARGETS
                    .iter()
                    .map(|target| format!("{target}={}", self.level)),
            );
        }
        directives
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.directives().join(","))
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .pretty()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stderr);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false)
                    .with_writer(io::stderr);
                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        let summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": self.format.to_string(),
                "location": self.include_location
            }
        });
        tracing::debug!("Logging configured: {summary}");
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            "Stack teardown starting"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_forces_debug() {
        let config = LoggingConfig::default().verbose();
        assert_eq!(config.level, "debug");
        assert_eq!(config.service_name, "stack-teardown");
    }

    #[test]
    fn test_verbose_wins_over_rust_log_directives() {
        let config = LoggingConfig {
            level: "warn,aws_sdk_s3=trace".into(),
            ..LoggingConfig::default()
        }
        .verbose();
        let directives = config.directives();
        assert_eq!(directives[0], "debug");
        assert!(directives.contains(&"stack_teardown=debug".to_owned()));
        assert!(directives.contains(&"aws_sdk_s3=warn".to_owned()));
    }

    #[test]
    fn test_compound_level_adds_no_crate_directives() {
        let config = LoggingConfig {
            level: "info,hyper=debug".into(),
            ..LoggingConfig::default()
        };
        let directives = config.directives();
        assert_eq!(directives[0], "info,hyper=debug");
        assert!(!directives.iter().any(|d| d.starts_with("stack_teardown")));
        assert!(!directives.iter().any(|d| d.starts_with("hyper=")));
        assert!(directives.contains(&"aws_config=warn".to_owned()));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }
}

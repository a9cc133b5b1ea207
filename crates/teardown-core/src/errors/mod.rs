// ABOUTME: Unified error handling with error codes shared by every teardown step
// ABOUTME: Defines AppError, ErrorCode, ErrorContext, and the CloudError conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Standard error types and error codes for the teardown tool. Service calls
//! raise [`CloudError`]; the workflow and configuration layers surface
//! [`AppError`], which carries a stable [`ErrorCode`] and optional context
//! naming the resource involved.

/// Errors raised by cloud service calls
pub mod cloud;

pub use cloud::{CloudError, CloudResult};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,
    #[serde(rename = "OPERATION_TIMED_OUT")]
    OperationTimedOut = 4008,

    // External Services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceLocked => "The resource was modified concurrently",
            Self::OperationTimedOut => "Timed out waiting for the operation to finish",
            Self::ExternalServiceError => "A cloud service call failed",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Process exit status used by the binary when this error ends a run
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid => 2,
            _ => 1,
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Service the failing call was made against
    pub service: Option<String>,
    /// Resource ID if applicable
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            service: None,
            resource_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Name the service the error came from
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.context.service = Some(service.into());
        self
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration value is absent
    pub fn config_missing(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{key} must be set in the environment or on the command line"),
        )
        .with_details(serde_json::json!({ "key": key }))
    }

    /// Configuration value could not be parsed or violates a constraint
    pub fn config_invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConfigInvalid,
            format!("{key}: {}", reason.into()),
        )
        .with_details(serde_json::json!({ "key": key }))
    }

    /// Waiting for an operation exceeded its deadline
    pub fn timed_out(operation: impl Into<String>, waited_secs: u64) -> Self {
        Self::new(
            ErrorCode::OperationTimedOut,
            format!("{} did not finish within {waited_secs}s", operation.into()),
        )
        .with_details(serde_json::json!({ "waited_secs": waited_secs }))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<CloudError> for AppError {
    fn from(error: CloudError) -> Self {
        let code = match &error {
            CloudError::NotFound { .. } => ErrorCode::ResourceNotFound,
            CloudError::PreconditionFailed { .. } => ErrorCode::ResourceLocked,
            CloudError::InvalidResponse { .. } => ErrorCode::SerializationError,
            CloudError::Api { .. } => ErrorCode::ExternalServiceError,
        };
        let mut app = Self::new(code, error.to_string()).with_service(error.service());
        if let Some(id) = error.resource_id() {
            app = app.with_resource_id(id);
        }
        app.with_source(error)
    }
}

// ABOUTME: Error types raised by cloud service calls (CDN, certificates, storage, DNS)
// ABOUTME: Structured variants keep the service, operation, and resource for logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Errors returned by the service traits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CloudError {
    /// The service rejected or failed the call
    #[error("{service} {operation} failed: {message}")]
    Api {
        /// Service the call was made against (e.g. `cloudfront`)
        service: &'static str,
        /// API operation name
        operation: &'static str,
        /// Service-provided error message
        message: String,
    },

    /// The named resource does not exist
    #[error("{resource} '{id}' not found in {service}")]
    NotFound {
        /// Service that owns the resource
        service: &'static str,
        /// Kind of resource (distribution, bucket, hosted zone, ...)
        resource: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// An optimistic-concurrency token (ETag) no longer matches
    #[error("{resource} '{id}' was modified since it was read ({service})")]
    PreconditionFailed {
        /// Service that owns the resource
        service: &'static str,
        /// Kind of resource
        resource: &'static str,
        /// Identifier of the resource
        id: String,
    },

    /// A response was missing a field the workflow relies on
    #[error("{service} returned an unusable response: {message}")]
    InvalidResponse {
        /// Service that produced the response
        service: &'static str,
        /// What was wrong with it
        message: String,
    },
}

impl CloudError {
    /// Create an API failure error
    #[must_use]
    pub fn api(service: &'static str, operation: &'static str, message: impl Into<String>) -> Self {
        Self::Api {
            service,
            operation,
            message: message.into(),
        }
    }

    /// Create a "not found" error
    #[must_use]
    pub fn not_found(service: &'static str, resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            service,
            resource,
            id: id.into(),
        }
    }

    /// Create a stale-ETag error
    #[must_use]
    pub fn precondition_failed(
        service: &'static str,
        resource: &'static str,
        id: impl Into<String>,
    ) -> Self {
        Self::PreconditionFailed {
            service,
            resource,
            id: id.into(),
        }
    }

    /// Create an unusable-response error
    #[must_use]
    pub fn invalid_response(service: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            service,
            message: message.into(),
        }
    }

    /// Service the error originated from
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::Api { service, .. }
            | Self::NotFound { service, .. }
            | Self::PreconditionFailed { service, .. }
            | Self::InvalidResponse { service, .. } => service,
        }
    }

    /// Resource identifier, when the error names one
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            Self::NotFound { id, .. } | Self::PreconditionFailed { id, .. } => Some(id),
            Self::Api { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Whether the error means the resource is absent
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for service calls
pub type CloudResult<T> = Result<T, CloudError>;

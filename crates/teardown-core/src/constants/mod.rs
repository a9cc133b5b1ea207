// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment variable names, defaults, service names, and DNS matching rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Environment variable names read by the configuration layer
pub mod env_vars {
    /// Domain whose stack is torn down
    pub const DOMAIN_NAME: &str = "DOMAIN_NAME";
    /// Bucket to empty and delete
    pub const BUCKET_NAME: &str = "del_bucket";
    /// Explicit distribution id, skips the alias lookup
    pub const DISTRIBUTION_ID: &str = "distributionId";
    /// Region used for CloudFront, ACM, and Route 53 clients
    pub const ACM_REGION: &str = "AWS_ACM_REGION";
    /// Region used for the S3 client
    pub const S3_REGION: &str = "AWS_S3_REGION";
    /// Seconds between distribution status polls
    pub const POLL_INTERVAL_SECS: &str = "TEARDOWN_POLL_INTERVAL_SECS";
    /// Upper bound on a single deployment wait
    pub const MAX_WAIT_SECS: &str = "TEARDOWN_MAX_WAIT_SECS";
    /// Delete the hosted zone after its records
    pub const DELETE_HOSTED_ZONE: &str = "TEARDOWN_DELETE_HOSTED_ZONE";
}

/// Default configuration values
pub mod defaults {
    /// CloudFront only accepts ACM certificates from us-east-1
    pub const ACM_REGION: &str = "us-east-1";
    /// Seconds between distribution status polls
    pub const POLL_INTERVAL_SECS: u64 = 30;
}

/// Service names used in errors and structured log fields
pub mod services {
    /// CDN service
    pub const CLOUDFRONT: &str = "cloudfront";
    /// Certificate service
    pub const ACM: &str = "acm";
    /// Object storage service
    pub const S3: &str = "s3";
    /// DNS service
    pub const ROUTE53: &str = "route53";
    /// Name reported by the logging layer
    pub const STACK_TEARDOWN: &str = "stack-teardown";
}

/// Resource kinds used in errors
pub mod resources {
    /// CDN distribution
    pub const DISTRIBUTION: &str = "distribution";
    /// TLS certificate
    pub const CERTIFICATE: &str = "certificate";
    /// Storage bucket
    pub const BUCKET: &str = "bucket";
    /// Stored object
    pub const OBJECT: &str = "object";
    /// DNS hosted zone
    pub const HOSTED_ZONE: &str = "hosted zone";
}

/// DNS record selection rules
pub mod dns {
    /// Host label removed alongside the apex record
    pub const WWW_LABEL: &str = "www";
    /// Route 53 action used to remove records
    pub const DELETE_ACTION: &str = "DELETE";
}

/// CloudFront deployment status strings
pub mod cdn {
    /// Status once a configuration change has propagated
    pub const STATUS_DEPLOYED: &str = "Deployed";
    /// Status while a configuration change propagates
    pub const STATUS_IN_PROGRESS: &str = "InProgress";
}

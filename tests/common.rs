// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, config builders, and a seeded synthetic cloud
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `stack_teardown`

use std::sync::{Arc, Once};
use std::time::Duration;

use stack_teardown::config::{PollingConfig, RegionConfig, TeardownConfig};
use stack_teardown::models::RecordType;
use teardown_providers::synthetic::simple_record;
use teardown_providers::{CloudServices, SyntheticCloud, SyntheticSettings};

static INIT_LOGGER: Once = Once::new();

pub const DOMAIN: &str = "example.com";
pub const BUCKET: &str = "example-site";
pub const DISTRIBUTION_ID: &str = "E2QWRUHAPOMQZL";
pub const CERT_ARN: &str =
    "arn:aws:acm:us-east-1:111122223333:certificate/12345678-aaaa-bbbb-cccc-1234567890ab";

/// Initialize quiet logging for tests; `TEST_LOG=DEBUG` turns it up
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration for `example.com` polling every 30s with no deadline
pub fn test_config() -> TeardownConfig {
    TeardownConfig {
        domain: DOMAIN.to_owned(),
        bucket: BUCKET.to_owned(),
        distribution_id: None,
        regions: RegionConfig {
            acm: "us-east-1".to_owned(),
            s3: "eu-west-1".to_owned(),
        },
        polling: PollingConfig {
            interval: Duration::from_secs(30),
            max_wait: None,
        },
        delete_hosted_zone: false,
    }
}

/// A complete stack for `example.com`: distribution with certificate,
/// certificate, bucket with three objects, and a zone with site records.
/// Returns the cloud and the zone id.
pub fn seeded_cloud(settings: SyntheticSettings) -> (Arc<SyntheticCloud>, String) {
    init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings));
    cloud.add_distribution(
        DISTRIBUTION_ID,
        &[DOMAIN, "www.example.com"],
        Some(CERT_ARN),
    );
    cloud.add_distribution("EOTHERSITE0001", &["other.org"], None);
    cloud.add_certificate(CERT_ARN, DOMAIN);
    cloud.add_certificate(
        "arn:aws:acm:us-east-1:111122223333:certificate/other",
        "other.org",
    );
    cloud.add_bucket(BUCKET, &["index.html", "css/site.css", "img/logo.png"]);

    let zone_id = cloud.add_hosted_zone(DOMAIN);
    cloud.add_record(&zone_id, simple_record(DOMAIN, RecordType::A, "192.0.2.10"));
    cloud.add_record(
        &zone_id,
        simple_record("www.example.com", RecordType::Cname, "d111111abcdef8.cloudfront.net"),
    );
    cloud.add_record(
        &zone_id,
        simple_record(DOMAIN, RecordType::Txt, "\"v=spf1 -all\""),
    );
    cloud.add_record(&zone_id, simple_record("api.example.com", RecordType::A, "192.0.2.20"));
    (cloud, zone_id)
}

/// Services that all resolve to `cloud`
pub fn services(cloud: &Arc<SyntheticCloud>) -> CloudServices {
    CloudServices::from_single(Arc::clone(cloud))
}

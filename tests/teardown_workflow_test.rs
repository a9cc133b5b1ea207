// ABOUTME: Integration tests for the teardown workflow against the synthetic cloud
// ABOUTME: Covers the full run, each not-found stop, soft and hard failures, and deployment waits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{seeded_cloud, services, test_config, BUCKET, CERT_ARN, DISTRIBUTION_ID, DOMAIN};
use stack_teardown::errors::{CloudError, ErrorCode};
use stack_teardown::models::{RecordRouting, RecordType};
use stack_teardown::teardown::{Step, StepOutcome, Teardown};
use teardown_providers::synthetic::simple_record;
use teardown_providers::{SyntheticCloud, SyntheticSettings};
use tokio::time::Instant;

fn settings() -> SyntheticSettings {
    SyntheticSettings {
        deploy_polls: 2,
        page_size: 2,
    }
}

fn count_calls(cloud: &SyntheticCloud, prefix: &str) -> usize {
    cloud
        .calls()
        .iter()
        .filter(|call| call.starts_with(prefix))
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_full_teardown_removes_every_resource() {
    let (cloud, zone_id) = seeded_cloud(settings());
    let started = Instant::now();

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(report.distribution_id.as_deref(), Some(DISTRIBUTION_ID));
    assert_eq!(report.certificate_arn.as_deref(), Some(CERT_ARN));
    assert_eq!(report.distribution, StepOutcome::Completed);
    assert_eq!(report.certificate, StepOutcome::Completed);
    assert_eq!(report.bucket_removal, StepOutcome::Completed);
    assert_eq!(report.dns_records, StepOutcome::Completed);
    assert_eq!(report.hosted_zone, StepOutcome::Skipped);
    assert_eq!(report.objects_deleted, 3);
    assert_eq!(report.records_deleted, 2);
    assert!(!report.stopped_early());
    assert!(!report.has_failures());
    assert!(report.finished_at.is_some());

    assert!(cloud.distribution(DISTRIBUTION_ID).is_none());
    assert!(cloud.distribution("EOTHERSITE0001").is_some());
    assert!(!cloud.has_certificate(CERT_ARN));
    assert!(!cloud.has_bucket(BUCKET));

    let remaining: Vec<(String, RecordType)> = cloud
        .records(&zone_id)
        .into_iter()
        .map(|r| (r.name, r.record_type))
        .collect();
    assert_eq!(remaining.len(), 4);
    assert!(remaining.contains(&("example.com.".to_owned(), RecordType::Txt)));
    assert!(remaining.contains(&("api.example.com.".to_owned(), RecordType::A)));
    assert!(!remaining.contains(&("example.com.".to_owned(), RecordType::A)));

    // Two deployment waits of two in-progress polls each
    assert_eq!(started.elapsed(), Duration::from_secs(120));
    assert_eq!(count_calls(&cloud, "UpdateDistribution"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_steps_run_in_dependency_order() {
    let (cloud, _) = seeded_cloud(settings());
    Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    let calls = cloud.calls();
    let position = |call: &str| {
        calls
            .iter()
            .position(|c| c == call)
            .unwrap_or_else(|| panic!("{call} was never made: {calls:?}"))
    };
    let delete_distribution = position(&format!("DeleteDistribution:{DISTRIBUTION_ID}"));
    let delete_certificate = position(&format!("DeleteCertificate:{CERT_ARN}"));
    let delete_bucket = position(&format!("DeleteBucket:{BUCKET}"));
    let change_records = calls
        .iter()
        .position(|c| c.starts_with("ChangeResourceRecordSets"))
        .unwrap();

    assert!(delete_distribution < delete_certificate);
    assert!(delete_certificate < delete_bucket);
    assert!(delete_bucket < change_records);
    assert_eq!(count_calls(&cloud, "DeleteObject"), 3);
    assert_eq!(count_calls(&cloud, "ListObjectsV2"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_missing_distribution_stops_before_anything_is_deleted() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution("EOTHERSITE0001", &["other.org"], None);
    cloud.add_certificate(CERT_ARN, DOMAIN);
    cloud.add_bucket(BUCKET, &["index.html"]);

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(report.distribution, StepOutcome::NotFound);
    assert_eq!(report.stopped_at, Some(Step::Distribution));
    assert_eq!(report.certificate, StepOutcome::Skipped);
    assert!(!report.has_failures());
    assert_eq!(cloud.calls(), vec!["ListDistributions:*"]);
    assert!(cloud.has_certificate(CERT_ARN));
    assert!(cloud.has_bucket(BUCKET));
}

#[tokio::test(start_paused = true)]
async fn test_alias_must_match_exactly() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution("E1", &["www.example.com", "example.com.au"], None);

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(report.distribution, StepOutcome::NotFound);
    assert!(cloud.distribution("E1").unwrap().enabled);
}

#[tokio::test(start_paused = true)]
async fn test_configured_distribution_id_skips_alias_lookup() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution("EUNALIASED0001", &[], Some(CERT_ARN));
    cloud.add_distribution("EOTHERSITE0001", &[DOMAIN], None);
    cloud.add_certificate(CERT_ARN, DOMAIN);
    cloud.add_bucket(BUCKET, &[]);
    cloud.add_hosted_zone(DOMAIN);
    let mut config = test_config();
    config.distribution_id = Some("EUNALIASED0001".to_owned());

    let report = Teardown::new(config, services(&cloud)).run().await.unwrap();

    assert_eq!(cloud.calls()[0], "GetDistributionConfig:EUNALIASED0001");
    assert_eq!(report.distribution_id.as_deref(), Some("EUNALIASED0001"));
    assert_eq!(report.certificate, StepOutcome::Completed);
    assert!(cloud.distribution("EUNALIASED0001").is_none());
    assert!(cloud.distribution("EOTHERSITE0001").unwrap().enabled);
}

#[tokio::test(start_paused = true)]
async fn test_certificate_still_in_use_is_an_error() {
    let (cloud, _) = seeded_cloud(settings());
    cloud.add_distribution("EUNALIASED0001", &[], None);
    let mut config = test_config();
    config.distribution_id = Some("EUNALIASED0001".to_owned());

    let error = Teardown::new(config, services(&cloud))
        .run()
        .await
        .unwrap_err();

    // The aliased distribution was never touched and still presents the certificate
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("ResourceInUseException"));
    assert!(cloud.distribution("EUNALIASED0001").is_none());
    assert!(cloud.has_certificate(CERT_ARN));
    assert!(cloud.has_bucket(BUCKET));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_configured_distribution_is_an_error() {
    let (cloud, _) = seeded_cloud(settings());
    let mut config = test_config();
    config.distribution_id = Some("EDOESNOTEXIST".to_owned());

    let error = Teardown::new(config, services(&cloud))
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.context.resource_id.as_deref(), Some("EDOESNOTEXIST"));
}

#[tokio::test(start_paused = true)]
async fn test_distribution_vanishing_during_deployment_wait_is_not_found() {
    let (cloud, _) = seeded_cloud(settings());
    // Listed once by the alias lookup, gone by the first deployment poll
    cloud.remove_distribution_after(DISTRIBUTION_ID, 1);

    let error = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.context.resource_id.as_deref(), Some(DISTRIBUTION_ID));
    assert_eq!(error.context.service.as_deref(), Some("cloudfront"));
    assert_eq!(count_calls(&cloud, "ListDistributions"), 2);
    assert!(cloud.has_certificate(CERT_ARN));
    assert!(cloud.has_bucket(BUCKET));
}

#[tokio::test(start_paused = true)]
async fn test_distribution_without_acm_certificate_is_waited_on_once() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution(DISTRIBUTION_ID, &[DOMAIN], None);
    cloud.add_certificate(CERT_ARN, DOMAIN);
    cloud.add_bucket(BUCKET, &[]);
    cloud.add_hosted_zone(DOMAIN);
    let started = Instant::now();

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(count_calls(&cloud, "UpdateDistribution"), 1);
    assert_eq!(started.elapsed(), Duration::from_secs(60));
    assert_eq!(report.distribution, StepOutcome::Completed);
    assert_eq!(report.objects_deleted, 0);
    assert_eq!(report.dns_records, StepOutcome::Skipped);
    assert_eq!(count_calls(&cloud, "ChangeResourceRecordSets"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_certificate_stops_after_distribution() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution(DISTRIBUTION_ID, &[DOMAIN], None);
    cloud.add_certificate("arn:aws:acm:us-east-1:1:certificate/www", "www.example.com");
    cloud.add_bucket(BUCKET, &["index.html"]);

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(report.distribution, StepOutcome::Completed);
    assert_eq!(report.certificate, StepOutcome::NotFound);
    assert_eq!(report.stopped_at, Some(Step::Certificate));
    assert_eq!(report.bucket_removal, StepOutcome::Skipped);
    assert!(cloud.has_bucket(BUCKET));
    assert!(cloud.has_certificate("arn:aws:acm:us-east-1:1:certificate/www"));
}

#[tokio::test(start_paused = true)]
async fn test_failed_distribution_delete_does_not_block_later_steps() {
    let (cloud, _) = seeded_cloud(settings());
    cloud.fail_next(
        "DeleteDistribution",
        CloudError::api("cloudfront", "DeleteDistribution", "AccessDenied"),
    );

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert!(
        matches!(report.distribution, StepOutcome::Failed(ref reason) if reason.contains("AccessDenied"))
    );
    assert_eq!(report.certificate, StepOutcome::Completed);
    assert_eq!(report.bucket_removal, StepOutcome::Completed);
    assert_eq!(report.dns_records, StepOutcome::Completed);
    assert!(report.has_failures());
    assert!(!report.stopped_early());

    // Left disabled with the default certificate
    let config = cloud.distribution_config(DISTRIBUTION_ID).unwrap();
    assert!(!config.enabled);
    assert!(config.viewer_certificate.acm_certificate_arn().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_bucket_failure_stops_before_dns() {
    let (cloud, zone_id) = seeded_cloud(settings());
    cloud.fail_next(
        "DeleteBucket",
        CloudError::api("s3", "DeleteBucket", "AccessDenied"),
    );

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert!(matches!(report.bucket_removal, StepOutcome::Failed(_)));
    assert_eq!(report.stopped_at, Some(Step::Bucket));
    assert_eq!(report.objects_deleted, 3);
    assert_eq!(report.dns_records, StepOutcome::Skipped);
    assert!(report.has_failures());
    assert_eq!(cloud.records(&zone_id).len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_missing_bucket_is_reported_not_found() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution(DISTRIBUTION_ID, &[DOMAIN], Some(CERT_ARN));
    cloud.add_certificate(CERT_ARN, DOMAIN);
    cloud.add_hosted_zone(DOMAIN);

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(report.certificate, StepOutcome::Completed);
    assert_eq!(report.bucket_removal, StepOutcome::NotFound);
    assert_eq!(report.stopped_at, Some(Step::Bucket));
    assert!(!report.has_failures());
    assert_eq!(count_calls(&cloud, "ListHostedZonesByName"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_routed_site_records_are_deleted() {
    let (cloud, zone_id) = seeded_cloud(settings());
    let mut latency = simple_record("www.example.com", RecordType::A, "192.0.2.30");
    latency.routing = RecordRouting {
        set_identifier: Some("use1".to_owned()),
        region: Some("us-east-1".to_owned()),
        health_check_id: Some("hc-1".to_owned()),
        ..RecordRouting::default()
    };
    cloud.add_record(&zone_id, latency);

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(report.dns_records, StepOutcome::Completed);
    assert_eq!(report.records_deleted, 3);
    assert!(cloud
        .records(&zone_id)
        .iter()
        .all(|r| r.routing.set_identifier.is_none()));
}

#[tokio::test(start_paused = true)]
async fn test_hosted_zone_must_be_the_domain_apex() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution(DISTRIBUTION_ID, &[DOMAIN], None);
    cloud.add_certificate(CERT_ARN, DOMAIN);
    cloud.add_bucket(BUCKET, &[]);
    let other = cloud.add_hosted_zone("example.org");
    cloud.add_record(&other, simple_record("example.org", RecordType::A, "192.0.2.1"));

    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    assert_eq!(report.bucket_removal, StepOutcome::Completed);
    assert_eq!(report.dns_records, StepOutcome::NotFound);
    assert_eq!(report.stopped_at, Some(Step::DnsRecords));
    assert_eq!(cloud.records(&other).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_hosted_zone_deleted_when_requested() {
    common::init_test_logging();
    let cloud = Arc::new(SyntheticCloud::with_settings(settings()));
    cloud.add_distribution(DISTRIBUTION_ID, &[DOMAIN], None);
    cloud.add_certificate(CERT_ARN, DOMAIN);
    cloud.add_bucket(BUCKET, &["index.html"]);
    let zone_id = cloud.add_hosted_zone(DOMAIN);
    cloud.add_record(&zone_id, simple_record(DOMAIN, RecordType::A, "192.0.2.10"));
    let mut config = test_config();
    config.delete_hosted_zone = true;

    let report = Teardown::new(config, services(&cloud)).run().await.unwrap();

    assert_eq!(report.records_deleted, 1);
    assert_eq!(report.hosted_zone, StepOutcome::Completed);
    assert!(!cloud.has_hosted_zone(&zone_id));
}

#[tokio::test(start_paused = true)]
async fn test_hosted_zone_with_other_records_is_an_error() {
    let (cloud, zone_id) = seeded_cloud(settings());
    let mut config = test_config();
    config.delete_hosted_zone = true;

    let error = Teardown::new(config, services(&cloud))
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert!(error.message.contains("HostedZoneNotEmpty"));
    assert!(cloud.has_hosted_zone(&zone_id));
    assert_eq!(cloud.records(&zone_id).len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_deployment_wait_times_out() {
    let (cloud, _) = seeded_cloud(SyntheticSettings {
        deploy_polls: 100,
        page_size: 1000,
    });
    let mut config = test_config();
    config.polling.max_wait = Some(Duration::from_secs(90));

    let error = Teardown::new(config, services(&cloud))
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::OperationTimedOut);
    assert_eq!(error.context.resource_id.as_deref(), Some(DISTRIBUTION_ID));
    assert!(cloud.has_certificate(CERT_ARN));
    assert!(!cloud.distribution(DISTRIBUTION_ID).unwrap().enabled);
}

#[tokio::test(start_paused = true)]
async fn test_service_error_propagates() {
    let (cloud, _) = seeded_cloud(settings());
    cloud.fail_next(
        "ListCertificates",
        CloudError::api("acm", "ListCertificates", "ThrottlingException"),
    );

    let error = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(error.context.service.as_deref(), Some("acm"));
    assert!(cloud.has_bucket(BUCKET));
}

#[tokio::test(start_paused = true)]
async fn test_report_serializes_to_json() {
    let (cloud, _) = seeded_cloud(settings());
    let report = Teardown::new(test_config(), services(&cloud))
        .run()
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["domain"], DOMAIN);
    assert_eq!(json["distribution"]["outcome"], "completed");
    assert_eq!(json["hosted_zone"]["outcome"], "skipped");
    assert_eq!(json["objects_deleted"], 3);
    assert!(json["stopped_at"].is_null());
}

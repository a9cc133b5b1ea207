// ABOUTME: Outcome record of a teardown run, one entry per resource removed
// ABOUTME: Serialized to JSON for --json output and summarized in the log at the end of a run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Stage of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// CDN distribution disable, detach, and delete
    Distribution,
    /// TLS certificate delete
    Certificate,
    /// Bucket empty and delete
    Bucket,
    /// Site record removal
    DnsRecords,
    /// Hosted zone delete
    HostedZone,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Distribution => "distribution",
            Self::Certificate => "certificate",
            Self::Bucket => "bucket",
            Self::DnsRecords => "dns records",
            Self::HostedZone => "hosted zone",
        })
    }
}

/// What happened to one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Removed
    Completed,
    /// Not reached, or nothing to do
    Skipped,
    /// The resource did not exist; the run stopped here
    NotFound,
    /// The service refused the call
    Failed(String),
}

impl StepOutcome {
    /// Whether this outcome counts as a failed run
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Skipped => f.write_str("skipped"),
            Self::NotFound => f.write_str("not found"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Result of a teardown run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    /// Domain the run targeted
    pub domain: String,
    /// Bucket the run targeted
    pub bucket: String,
    /// Distribution that was found, if any
    pub distribution_id: Option<String>,
    /// Certificate that was deleted, if any
    pub certificate_arn: Option<String>,
    /// Distribution outcome
    pub distribution: StepOutcome,
    /// Certificate outcome
    pub certificate: StepOutcome,
    /// Bucket outcome
    pub bucket_removal: StepOutcome,
    /// Site record outcome
    pub dns_records: StepOutcome,
    /// Hosted zone outcome
    pub hosted_zone: StepOutcome,
    /// Objects deleted from the bucket
    pub objects_deleted: usize,
    /// Record sets deleted from the zone
    pub records_deleted: usize,
    /// Step at which the run stopped early
    pub stopped_at: Option<Step>,
    /// Start of the run
    pub started_at: DateTime<Utc>,
    /// End of the run
    pub finished_at: Option<DateTime<Utc>>,
}

impl TeardownReport {
    /// Fresh report with every step not yet reached
    #[must_use]
    pub fn new(domain: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            bucket: bucket.into(),
            distribution_id: None,
            certificate_arn: None,
            distribution: StepOutcome::Skipped,
            certificate: StepOutcome::Skipped,
            bucket_removal: StepOutcome::Skipped,
            dns_records: StepOutcome::Skipped,
            hosted_zone: StepOutcome::Skipped,
            objects_deleted: 0,
            records_deleted: 0,
            stopped_at: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Mark the run as stopped at `step`
    pub(crate) fn stop(&mut self, step: Step) {
        self.stopped_at = Some(step);
    }

    /// Stamp the finish time
    #[must_use]
    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    /// Whether a missing resource or a refused call ended the run before DNS cleanup
    #[must_use]
    pub const fn stopped_early(&self) -> bool {
        self.stopped_at.is_some()
    }

    /// Whether any step failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes().iter().any(|(_, outcome)| outcome.is_failure())
    }

    /// Each step with its outcome, in execution order
    #[must_use]
    pub fn outcomes(&self) -> [(Step, &StepOutcome); 5] {
        [
            (Step::Distribution, &self.distribution),
            (Step::Certificate, &self.certificate),
            (Step::Bucket, &self.bucket_removal),
            (Step::DnsRecords, &self.dns_records),
            (Step::HostedZone, &self.hosted_zone),
        ]
    }

    /// Log one line per step plus a closing summary
    pub fn log_summary(&self) {
        for (step, outcome) in self.outcomes() {
            if outcome.is_failure() {
                warn!(step = %step, outcome = %outcome, "Teardown step failed");
            } else {
                info!(step = %step, outcome = %outcome, "Teardown step finished");
            }
        }
        let elapsed_secs = self
            .finished_at
            .map(|end| (end - self.started_at).num_seconds());
        info!(
            domain = %self.domain,
            objects_deleted = self.objects_deleted,
            records_deleted = self.records_deleted,
            stopped_at = self.stopped_at.map(|s| s.to_string()),
            elapsed_secs,
            "Teardown finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_has_no_failures() {
        let report = TeardownReport::new("example.com", "site");
        assert!(!report.has_failures());
        assert!(!report.stopped_early());
        assert_eq!(report.certificate, StepOutcome::Skipped);
    }

    #[test]
    fn test_failed_step_marks_report() {
        let mut report = TeardownReport::new("example.com", "site");
        report.bucket_removal = StepOutcome::Failed("AccessDenied".to_owned());
        report.stop(Step::Bucket);
        assert!(report.has_failures());
        assert!(report.stopped_early());
    }

    #[test]
    fn test_outcome_serializes_with_reason() {
        let json = serde_json::to_value(StepOutcome::Failed("denied".to_owned())).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["reason"], "denied");
        let json = serde_json::to_value(StepOutcome::NotFound).unwrap();
        assert_eq!(json["outcome"], "not_found");
    }
}

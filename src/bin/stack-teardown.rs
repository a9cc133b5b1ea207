// ABOUTME: stack-teardown - removes the CloudFront, ACM, S3, and Route 53 resources for one domain
// ABOUTME: Reads .env and the environment, applies flag overrides, and runs the teardown once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Everything from .env (DOMAIN_NAME, del_bucket, AWS_ACM_REGION, AWS_S3_REGION)
//! stack-teardown
//!
//! # Override the domain and bucket, give up after ten minutes per deployment wait
//! stack-teardown --domain example.com --bucket example-site --max-wait-secs 600
//!
//! # Also delete the hosted zone and print the report as JSON
//! stack-teardown --delete-hosted-zone --json
//! ```

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use stack_teardown::config::{CliOverrides, TeardownConfig};
use stack_teardown::errors::{AppError, AppResult};
use stack_teardown::logging::LoggingConfig;
use stack_teardown::teardown::{Teardown, TeardownReport};
use teardown_providers::{AwsRegions, AwsServices};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(
    name = "stack-teardown",
    version,
    about = "Tear down the hosting stack of a single domain",
    long_about = "Disables and deletes the CloudFront distribution serving a domain, deletes its ACM \
                  certificate, empties and deletes the site bucket, and removes the apex and www \
                  DNS records."
)]
struct Cli {
    /// Domain to tear down (overrides `DOMAIN_NAME`)
    #[arg(long)]
    domain: Option<String>,

    /// Bucket to empty and delete (overrides `del_bucket`)
    #[arg(long)]
    bucket: Option<String>,

    /// Distribution id; skips the lookup by alias (overrides `distributionId`)
    #[arg(long)]
    distribution_id: Option<String>,

    /// Region for CloudFront, ACM, and Route 53 (overrides `AWS_ACM_REGION`)
    #[arg(long)]
    acm_region: Option<String>,

    /// Region for S3 (overrides `AWS_S3_REGION`)
    #[arg(long)]
    s3_region: Option<String>,

    /// Seconds between deployment status checks
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    /// Give up on a deployment wait after this many seconds
    #[arg(long)]
    max_wait_secs: Option<u64>,

    /// Delete the hosted zone after its records
    #[arg(long)]
    delete_hosted_zone: bool,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            domain: self.domain.clone(),
            bucket: self.bucket.clone(),
            distribution_id: self.distribution_id.clone(),
            acm_region: self.acm_region.clone(),
            s3_region: self.s3_region.clone(),
            poll_interval_secs: self.poll_interval_secs,
            max_wait_secs: self.max_wait_secs,
            delete_hosted_zone: self.delete_hosted_zone,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.verbose();
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(report) => {
            report.log_summary();
            if cli.json {
                if let Err(e) = print_report(&report) {
                    error!("Error: {e:#}");
                    return ExitCode::FAILURE;
                }
            }
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!(code = ?e.code, service = ?e.context.service, "Error: {e}");
            u8::try_from(e.code.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
        }
    }
}

async fn run(cli: &Cli) -> AppResult<TeardownReport> {
    TeardownConfig::load_dotenv();
    let config = TeardownConfig::resolve(cli.overrides())?;
    config.log_summary();

    let services = AwsServices::load(&AwsRegions {
        acm: config.regions.acm.clone(),
        s3: config.regions.s3.clone(),
    })
    .await;
    let teardown = Teardown::new(config, services);

    tokio::select! {
        result = teardown.run() => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; resources already removed stay removed");
            Err(AppError::internal("teardown interrupted"))
        }
    }
}

fn print_report(report: &TeardownReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing teardown report")?;
    println!("{json}");
    info!(bytes = json.len(), "Report written to stdout");
    Ok(())
}

// ABOUTME: Bucket step: delete every object page by page, then the bucket itself
// ABOUTME: Object count is written into the report as deletion proceeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::info;

use super::{Teardown, TeardownReport};
use crate::errors::CloudResult;

impl Teardown {
    /// Delete all objects, following continuation tokens
    pub(crate) async fn empty_bucket(&self, report: &mut TeardownReport) -> CloudResult<()> {
        let bucket = &self.config.bucket;
        info!(bucket = %bucket, "Emptying bucket: {bucket}");

        let mut token: Option<String> = None;
        loop {
            let page = self
                .services
                .storage
                .list_objects(bucket, token.as_deref())
                .await?;
            for object in &page.objects {
                info!(bucket = %bucket, key = %object.key, "Deleting object: {}", object.key);
                self.services.storage.delete_object(bucket, &object.key).await?;
                report.objects_deleted += 1;
            }
            match page.next_token() {
                Some(next) => token = Some(next.to_owned()),
                None => return Ok(()),
            }
        }
    }

    /// Empty the bucket and delete it; errors stay service-level so the
    /// caller can tell a missing bucket from a refusal
    pub(crate) async fn delete_bucket(&self, report: &mut TeardownReport) -> CloudResult<()> {
        self.empty_bucket(report).await?;
        let bucket = &self.config.bucket;
        info!(bucket = %bucket, "Deleting bucket: {bucket}");
        self.services.storage.delete_bucket(bucket).await?;
        Ok(())
    }
}

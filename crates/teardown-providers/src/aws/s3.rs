// ABOUTME: S3 implementation of the object storage service trait
// ABOUTME: Lists objects with continuation tokens and deletes objects and buckets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use aws_sdk_s3::Client;

use super::ErrorMapping;
use crate::constants::{resources, services};
use crate::core::ObjectStorageService;
use crate::errors::CloudResult;
use crate::models::{ObjectPage, ObjectSummary};

const NOT_FOUND_CODES: &[&str] = &["NoSuchBucket"];

/// Object storage backed by S3
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Wrap an SDK client
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    fn mapping<'a>(operation: &'static str, resource: &'static str, id: &'a str) -> ErrorMapping<'a> {
        ErrorMapping {
            service: services::S3,
            operation,
            resource,
            id,
            not_found_codes: NOT_FOUND_CODES,
        }
    }
}

#[async_trait]
impl ObjectStorageService for S3Storage {
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
    ) -> CloudResult<ObjectPage> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token.map(str::to_owned))
            .send()
            .await
            .map_err(|e| Self::mapping("ListObjectsV2", resources::BUCKET, bucket).map(&e))?;

        let objects = output
            .contents()
            .iter()
            .filter_map(|object| {
                object.key().map(|key| ObjectSummary {
                    key: key.to_owned(),
                })
            })
            .collect();
        let next_continuation_token = output.next_continuation_token().map(str::to_owned);
        Ok(ObjectPage {
            objects,
            // A next token is only returned for truncated listings
            is_truncated: next_continuation_token.is_some(),
            next_continuation_token,
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> CloudResult<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Self::mapping("DeleteObject", resources::OBJECT, key).map(&e))?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> CloudResult<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| Self::mapping("DeleteBucket", resources::BUCKET, bucket).map(&e))?;
        Ok(())
    }
}

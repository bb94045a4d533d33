use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::storage::{ObjectHandle, ObjectStore, StoreError};

/// S3 (or MinIO) bucket store. Keys are `documents/<uuid>/<filename>` so
/// repeated uploads of the same filename never collide.
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

fn object_key(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("documents/{}/{safe}", Uuid::new_v4())
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<ObjectHandle, StoreError> {
        let key = object_key(filename);
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StoreError::Object(format!("S3 upload failed: {e}")))?;

        info!("Uploaded {size} bytes to s3://{}/{}", self.bucket, key);
        Ok(ObjectHandle(key))
    }

    async fn get(&self, handle: &ObjectHandle) -> Result<Bytes, StoreError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&handle.0)
            .send()
            .await
            .map_err(|e| StoreError::Object(format!("S3 download failed: {e}")))?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Object(format!("S3 body read failed: {e}")))?;
        Ok(data.into_bytes())
    }
}

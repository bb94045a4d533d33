//! Persistence seams.
//!
//! Services only see these traits; `AppState` carries `Arc<dyn …>` handles so
//! Postgres and S3 can be swapped for the in-memory versions in tests.

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod s3;

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::annotation::AnnotationSet;
use crate::models::resume::{RenderRecord, ResumeRecord, StructuredResume};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Object store error: {0}")]
    Object(String),
}

/// Opaque key of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ObjectHandle(pub String);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<ObjectHandle, StoreError>;

    async fn get(&self, handle: &ObjectHandle) -> Result<Bytes, StoreError>;
}

/// Input for appending a resume version.
#[derive(Debug, Clone)]
pub struct NewResumeVersion {
    pub resume_id: Uuid,
    pub user_id: Option<String>,
    pub title: String,
    pub data: StructuredResume,
}

/// Append-only resume snapshots. Saving never updates an existing version.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn save_version(&self, new: NewResumeVersion) -> Result<ResumeRecord, StoreError>;
    async fn latest(&self, resume_id: Uuid) -> Result<Option<ResumeRecord>, StoreError>;
    async fn record_render(&self, render: &RenderRecord) -> Result<(), StoreError>;

    /// Most recently recorded render of the resume, optionally restricted to
    /// one template variant.
    async fn latest_render(
        &self,
        resume_id: Uuid,
        template_id: Option<&str>,
    ) -> Result<Option<RenderRecord>, StoreError>;
}

#[async_trait]
pub trait AnnotationRepository: Send + Sync {
    /// Exact `(document, reviewer)` lookup when `reviewer_id` is given, else
    /// any set stored for the document.
    async fn find_one(
        &self,
        document_id: &str,
        reviewer_id: Option<&str>,
    ) -> Result<Option<AnnotationSet>, StoreError>;

    /// Every set for the document, in insertion order.
    async fn find_for_document(&self, document_id: &str) -> Result<Vec<AnnotationSet>, StoreError>;

    /// Replaces the set stored under the same `(document, reviewer)` key, or
    /// inserts it. Anonymous sets share one slot per document.
    async fn upsert(&self, set: &AnnotationSet) -> Result<(), StoreError>;
}

/// Storage key for a reviewer. Anonymous reviewers map to the empty key.
pub fn reviewer_key(reviewer_id: Option<&str>) -> &str {
    reviewer_id.unwrap_or_default()
}

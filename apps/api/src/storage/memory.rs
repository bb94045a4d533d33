//! In-process stand-ins for Postgres, S3 and the LaTeX toolchain.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::annotation::AnnotationSet;
use crate::models::resume::{RenderRecord, ResumeRecord};
use crate::render::{CompileError, DocumentCompiler};
use crate::storage::{
    reviewer_key, AnnotationRepository, NewResumeVersion, ObjectHandle, ObjectStore,
    ResumeRepository, StoreError,
};

#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<Vec<ResumeRecord>>,
    pub renders: Mutex<Vec<RenderRecord>>,
    annotations: Mutex<Vec<AnnotationSet>>,
}

#[async_trait]
impl ResumeRepository for MemoryStore {
    async fn save_version(&self, new: NewResumeVersion) -> Result<ResumeRecord, StoreError> {
        let mut resumes = self.resumes.lock().unwrap();
        let version = resumes
            .iter()
            .filter(|r| r.resume_id == new.resume_id)
            .map(|r| r.version)
            .max()
            .unwrap_or(0)
            + 1;
        let record = ResumeRecord {
            resume_id: new.resume_id,
            version,
            user_id: new.user_id,
            title: new.title,
            data: Json(new.data),
            created_at: Utc::now(),
        };
        resumes.push(record.clone());
        Ok(record)
    }

    async fn latest(&self, resume_id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        Ok(self
            .resumes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.resume_id == resume_id)
            .max_by_key(|r| r.version)
            .cloned())
    }

    async fn record_render(&self, render: &RenderRecord) -> Result<(), StoreError> {
        self.renders.lock().unwrap().push(render.clone());
        Ok(())
    }

    async fn latest_render(
        &self,
        resume_id: Uuid,
        template_id: Option<&str>,
    ) -> Result<Option<RenderRecord>, StoreError> {
        Ok(self
            .renders
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| {
                r.resume_id == resume_id && template_id.map_or(true, |t| r.template_id == t)
            })
            .cloned())
    }
}

#[async_trait]
impl AnnotationRepository for MemoryStore {
    async fn find_one(
        &self,
        document_id: &str,
        reviewer_id: Option<&str>,
    ) -> Result<Option<AnnotationSet>, StoreError> {
        let sets = self.annotations.lock().unwrap();
        Ok(sets
            .iter()
            .find(|s| {
                s.document_id == document_id
                    && reviewer_id.map_or(true, |r| reviewer_key(s.reviewer_id.as_deref()) == r)
            })
            .cloned())
    }

    async fn find_for_document(&self, document_id: &str) -> Result<Vec<AnnotationSet>, StoreError> {
        Ok(self
            .annotations
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, set: &AnnotationSet) -> Result<(), StoreError> {
        let mut sets = self.annotations.lock().unwrap();
        let key = reviewer_key(set.reviewer_id.as_deref());
        match sets.iter_mut().find(|s| {
            s.document_id == set.document_id && reviewer_key(s.reviewer_id.as_deref()) == key
        }) {
            Some(existing) => *existing = set.clone(),
            None => sets.push(set.clone()),
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (Bytes, String)>>,
    counter: AtomicUsize,
}

impl MemoryObjectStore {
    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn content_type(&self, handle: &ObjectHandle) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(&handle.0)
            .map(|(_, ct)| ct.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        bytes: Bytes,
        filename: &str,
        content_type: &str,
    ) -> Result<ObjectHandle, StoreError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let key = format!("mem/{n}/{filename}");
        self.objects
            .lock()
            .unwrap()
            .insert(key.clone(), (bytes, content_type.to_string()));
        Ok(ObjectHandle(key))
    }

    async fn get(&self, handle: &ObjectHandle) -> Result<Bytes, StoreError> {
        self.objects
            .lock()
            .unwrap()
            .get(&handle.0)
            .map(|(b, _)| b.clone())
            .ok_or_else(|| StoreError::Object(format!("no such object: {handle}")))
    }
}

/// Compiler double: succeeds with a fixed PDF stub unless built with
/// [`StubCompiler::failing`].
#[derive(Default)]
pub struct StubCompiler {
    failure: Option<String>,
    pub calls: AtomicUsize,
}

impl StubCompiler {
    pub fn failing(diagnostic: &str) -> Self {
        Self {
            failure: Some(diagnostic.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentCompiler for StubCompiler {
    async fn compile(&self, _markup: &str) -> Result<Bytes, CompileError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(diagnostic) => Err(CompileError::MissingOutput {
                diagnostic: diagnostic.clone(),
            }),
            None => Ok(Bytes::from_static(b"%PDF-1.5 stub")),
        }
    }
}

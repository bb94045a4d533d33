use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::annotation::{AnnotationSet, HighlightMap};
use crate::models::resume::{RenderRecord, ResumeRecord};
use crate::storage::{
    reviewer_key, AnnotationRepository, NewResumeVersion, ResumeRepository, StoreError,
};

/// Postgres-backed resume and annotation storage. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AnnotationRow {
    document_id: String,
    reviewer_id: Option<String>,
    reviewer_name: String,
    highlights: Json<HighlightMap>,
    first_highlight_created_at: Option<DateTime<Utc>>,
}

impl From<AnnotationRow> for AnnotationSet {
    fn from(row: AnnotationRow) -> Self {
        Self {
            document_id: row.document_id,
            reviewer_id: row.reviewer_id,
            reviewer_name: row.reviewer_name,
            highlights: row.highlights.0,
            first_highlight_created_at: row.first_highlight_created_at,
        }
    }
}

const ANNOTATION_COLUMNS: &str =
    "document_id, reviewer_id, reviewer_name, highlights, first_highlight_created_at";

// ────────────────────────────────────────────────────────────────────────────
// Resumes
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ResumeRepository for PgStore {
    async fn save_version(&self, new: NewResumeVersion) -> Result<ResumeRecord, StoreError> {
        // Append-only: the next version is computed and inserted in one statement
        let record = sqlx::query_as::<_, ResumeRecord>(
            r#"
            INSERT INTO resumes (resume_id, version, user_id, title, data)
            SELECT $1, COALESCE(MAX(version), 0) + 1, $2, $3, $4
            FROM resumes
            WHERE resume_id = $1
            RETURNING resume_id, version, user_id, title, data, created_at
            "#,
        )
        .bind(new.resume_id)
        .bind(&new.user_id)
        .bind(&new.title)
        .bind(Json(&new.data))
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Inserted resume {} version {}",
            record.resume_id, record.version
        );
        Ok(record)
    }

    async fn latest(&self, resume_id: Uuid) -> Result<Option<ResumeRecord>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRecord>(
            r#"
            SELECT resume_id, version, user_id, title, data, created_at
            FROM resumes
            WHERE resume_id = $1
            ORDER BY version DESC
            LIMIT 1
            "#,
        )
        .bind(resume_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn record_render(&self, render: &RenderRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO resume_renders
                (resume_id, version, template_id, latex_handle, pdf_handle, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(render.resume_id)
        .bind(render.version)
        .bind(&render.template_id)
        .bind(&render.latex_handle)
        .bind(&render.pdf_handle)
        .bind(render.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn latest_render(
        &self,
        resume_id: Uuid,
        template_id: Option<&str>,
    ) -> Result<Option<RenderRecord>, StoreError> {
        Ok(sqlx::query_as::<_, RenderRecord>(
            r#"
            SELECT resume_id, version, template_id, latex_handle, pdf_handle, created_at
            FROM resume_renders
            WHERE resume_id = $1 AND ($2::TEXT IS NULL OR template_id = $2)
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(resume_id)
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Annotations
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl AnnotationRepository for PgStore {
    async fn find_one(
        &self,
        document_id: &str,
        reviewer_id: Option<&str>,
    ) -> Result<Option<AnnotationSet>, StoreError> {
        let row = match reviewer_id {
            Some(reviewer_id) => {
                sqlx::query_as::<_, AnnotationRow>(&format!(
                    "SELECT {ANNOTATION_COLUMNS} FROM annotation_sets \
                     WHERE document_id = $1 AND reviewer_key = $2"
                ))
                .bind(document_id)
                .bind(reviewer_id)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AnnotationRow>(&format!(
                    "SELECT {ANNOTATION_COLUMNS} FROM annotation_sets \
                     WHERE document_id = $1 ORDER BY id LIMIT 1"
                ))
                .bind(document_id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(row.map(AnnotationSet::from))
    }

    async fn find_for_document(&self, document_id: &str) -> Result<Vec<AnnotationSet>, StoreError> {
        let rows = sqlx::query_as::<_, AnnotationRow>(&format!(
            "SELECT {ANNOTATION_COLUMNS} FROM annotation_sets WHERE document_id = $1 ORDER BY id"
        ))
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(AnnotationSet::from).collect())
    }

    async fn upsert(&self, set: &AnnotationSet) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO annotation_sets
                (document_id, reviewer_key, reviewer_id, reviewer_name,
                 highlights, first_highlight_created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (document_id, reviewer_key) DO UPDATE SET
                reviewer_name = EXCLUDED.reviewer_name,
                highlights = EXCLUDED.highlights,
                first_highlight_created_at = EXCLUDED.first_highlight_created_at,
                updated_at = now()
            "#,
        )
        .bind(&set.document_id)
        .bind(reviewer_key(set.reviewer_id.as_deref()))
        .bind(&set.reviewer_id)
        .bind(&set.reviewer_name)
        .bind(Json(&set.highlights))
        .bind(set.first_highlight_created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

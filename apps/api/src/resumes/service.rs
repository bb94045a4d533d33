use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{RenderRecord, ResumeRecord, StructuredResume};
use crate::render::DocumentCompiler;
use crate::storage::{NewResumeVersion, ObjectHandle, ObjectStore, ResumeRepository};
use crate::template::{fill_markup, TemplateInfo, TemplateVariant};

const UNTITLED: &str = "Untitled Resume";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveResume {
    /// Appends a version to an existing resume when set.
    pub resume_id: Option<Uuid>,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub resume: StructuredResume,
}

/// Normalizes and appends a new version. Earlier versions stay untouched.
pub async fn save_resume(
    repo: &dyn ResumeRepository,
    req: SaveResume,
) -> Result<ResumeRecord, AppError> {
    let data = req.resume.normalized();
    let title = req
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            let name = data.full_name();
            if name.is_empty() {
                UNTITLED.to_string()
            } else {
                name
            }
        });

    let record = repo
        .save_version(NewResumeVersion {
            resume_id: req.resume_id.unwrap_or_else(Uuid::new_v4),
            user_id: req.user_id,
            title,
            data,
        })
        .await?;

    info!(
        "Saved resume {} v{} ({} experience, {} education entries)",
        record.resume_id,
        record.version,
        record.data.experience.len(),
        record.data.education.len()
    );
    Ok(record)
}

pub async fn get_resume(
    repo: &dyn ResumeRepository,
    resume_id: Uuid,
) -> Result<ResumeRecord, AppError> {
    repo.latest(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

/// Fills, compiles and stores the latest version of a resume.
///
/// The variant is resolved before anything is read or written, so an unknown
/// template id leaves no trace. A compile failure stores nothing.
pub async fn render_resume(
    repo: &dyn ResumeRepository,
    objects: &dyn ObjectStore,
    compiler: &dyn DocumentCompiler,
    resume_id: Uuid,
    template_id: &str,
) -> Result<RenderRecord, AppError> {
    let variant: TemplateVariant = template_id.parse()?;
    let record = get_resume(repo, resume_id).await?;

    info!(
        "Rendering resume {} v{} with template {variant}",
        record.resume_id, record.version
    );
    let markup = fill_markup(&record.data, variant, variant.skeleton());
    let pdf = compiler.compile(&markup).await.map_err(|e| {
        warn!("Render of resume {resume_id} failed: {e}");
        e
    })?;

    let stem = format!("resume_{resume_id}_{variant}");
    let latex_handle = objects
        .put(Bytes::from(markup), &format!("{stem}.tex"), "text/x-latex")
        .await?;
    let pdf_handle = objects
        .put(pdf, &format!("{stem}.pdf"), "application/pdf")
        .await?;

    let render = RenderRecord {
        resume_id: record.resume_id,
        version: record.version,
        template_id: variant.id().to_string(),
        latex_handle,
        pdf_handle,
        created_at: Utc::now(),
    };
    repo.record_render(&render).await?;

    info!("Rendered resume {resume_id} to {}", render.pdf_handle);
    Ok(render)
}

/// The two stored outputs of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderArtifact {
    Pdf,
    Latex,
}

impl RenderArtifact {
    pub fn content_type(self) -> &'static str {
        match self {
            RenderArtifact::Pdf => "application/pdf",
            RenderArtifact::Latex => "text/x-latex",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            RenderArtifact::Pdf => "pdf",
            RenderArtifact::Latex => "tex",
        }
    }

    fn handle(self, render: &RenderRecord) -> &ObjectHandle {
        match self {
            RenderArtifact::Pdf => &render.pdf_handle,
            RenderArtifact::Latex => &render.latex_handle,
        }
    }
}

/// Reads back one output of the latest render of a resume, restricted to
/// `template_id` when given.
pub async fn fetch_render_artifact(
    repo: &dyn ResumeRepository,
    objects: &dyn ObjectStore,
    resume_id: Uuid,
    template_id: Option<&str>,
    artifact: RenderArtifact,
) -> Result<(RenderRecord, Bytes), AppError> {
    let variant = template_id
        .map(str::parse::<TemplateVariant>)
        .transpose()?;

    let render = repo
        .latest_render(resume_id, variant.map(TemplateVariant::id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No render found for resume {resume_id}")))?;

    let bytes = objects.get(artifact.handle(&render)).await?;
    debug!(
        "Fetched {} bytes of {} for resume {resume_id}",
        bytes.len(),
        artifact.extension()
    );
    Ok((render, bytes))
}

pub fn list_templates() -> Vec<TemplateInfo> {
    TemplateVariant::ALL.iter().map(|v| v.info()).collect()
}

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{RenderRecord, ResumeRecord, StructuredResume};
use crate::resumes::form::{parse_form, to_form_prefill, FormFields, FormPrefill};
use crate::resumes::service::{self, RenderArtifact, SaveResume};
use crate::resumes::upload::{extract_upload, UploadExtraction};
use crate::state::AppState;
use crate::template::TemplateInfo;

const UPLOAD_FIELD: &str = "resume";

/// Either the flattened edit form or a structured resume.
#[derive(Deserialize)]
pub struct SaveResumeRequest {
    pub resume_id: Option<Uuid>,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub form: Option<FormFields>,
    pub resume: Option<StructuredResume>,
}

#[derive(Serialize)]
pub struct ResumeResponse {
    #[serde(flatten)]
    pub record: ResumeRecord,
    pub prefill: FormPrefill,
}

#[derive(Deserialize)]
pub struct RenderRequest {
    pub template_id: String,
}

#[derive(Deserialize)]
pub struct ArtifactQuery {
    pub template_id: Option<String>,
}

#[derive(Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateInfo>,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: service::list_templates(),
    })
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadExtraction>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.len() > state.config.max_upload_bytes {
            return Err(AppError::Validation(format!(
                "Upload exceeds {} bytes",
                state.config.max_upload_bytes
            )));
        }
        let extraction = extract_upload(state.objects.as_ref(), bytes, &filename).await?;
        return Ok(Json(extraction));
    }

    Err(AppError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' file field"
    )))
}

/// POST /api/v1/resumes
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<(StatusCode, Json<ResumeResponse>), AppError> {
    let resume = match (req.form, req.resume) {
        (Some(form), None) => parse_form(&form),
        (None, Some(resume)) => resume,
        _ => {
            return Err(AppError::Validation(
                "Provide exactly one of 'form' or 'resume'".to_string(),
            ))
        }
    };

    let record = service::save_resume(
        state.resumes.as_ref(),
        SaveResume {
            resume_id: req.resume_id,
            user_id: req.user_id,
            title: req.title,
            resume,
        },
    )
    .await?;

    let prefill = to_form_prefill(&record.data);
    Ok((StatusCode::CREATED, Json(ResumeResponse { record, prefill })))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeResponse>, AppError> {
    let record = service::get_resume(state.resumes.as_ref(), id).await?;
    let prefill = to_form_prefill(&record.data);
    Ok(Json(ResumeResponse { record, prefill }))
}

/// POST /api/v1/resumes/:id/render
pub async fn handle_render(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderRecord>, AppError> {
    let render = service::render_resume(
        state.resumes.as_ref(),
        state.objects.as_ref(),
        state.compiler.as_ref(),
        id,
        &req.template_id,
    )
    .await?;
    Ok(Json(render))
}

/// GET /api/v1/resumes/:id/pdf
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ArtifactQuery>,
) -> Result<Response, AppError> {
    download(&state, id, params.template_id.as_deref(), RenderArtifact::Pdf).await
}

/// GET /api/v1/resumes/:id/tex
pub async fn handle_download_latex(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ArtifactQuery>,
) -> Result<Response, AppError> {
    download(&state, id, params.template_id.as_deref(), RenderArtifact::Latex).await
}

async fn download(
    state: &AppState,
    id: Uuid,
    template_id: Option<&str>,
    artifact: RenderArtifact,
) -> Result<Response, AppError> {
    let (render, bytes) = service::fetch_render_artifact(
        state.resumes.as_ref(),
        state.objects.as_ref(),
        id,
        template_id,
        artifact,
    )
    .await?;

    let disposition = format!(
        "inline; filename=\"resume_{}_{}.{}\"",
        render.resume_id,
        render.template_id,
        artifact.extension()
    );
    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

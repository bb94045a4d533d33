use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::annotations::service::{self, SaveHighlights};
use crate::errors::AppError;
use crate::models::annotation::{AnnotationSet, HighlightMap, ReviewSummary};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReviewerQuery {
    pub reviewer_id: Option<String>,
}

#[derive(Serialize)]
pub struct HighlightsResponse {
    pub highlights: HighlightMap,
}

#[derive(Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewSummary>,
}

/// GET /api/v1/documents/:document_id/highlights
pub async fn handle_get_highlights(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Query(params): Query<ReviewerQuery>,
) -> Result<Json<HighlightsResponse>, AppError> {
    let highlights = service::get_highlights(
        state.annotations.as_ref(),
        &document_id,
        params.reviewer_id.as_deref(),
    )
    .await?;
    Ok(Json(HighlightsResponse { highlights }))
}

/// PUT /api/v1/documents/:document_id/highlights
pub async fn handle_save_highlights(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Json(req): Json<SaveHighlights>,
) -> Result<Json<AnnotationSet>, AppError> {
    let set = service::save_highlights(state.annotations.as_ref(), &document_id, req).await?;
    Ok(Json(set))
}

/// GET /api/v1/documents/:document_id/reviews
pub async fn handle_get_reviews(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<ReviewsResponse>, AppError> {
    let reviews = service::get_all_reviews(state.annotations.as_ref(), &document_id).await?;
    Ok(Json(ReviewsResponse { reviews }))
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::annotations::handlers as annotations;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Templates and resumes
        .route("/api/v1/templates", get(resumes::handle_list_templates))
        .route("/api/v1/resumes/extract", post(resumes::handle_extract))
        .route("/api/v1/resumes", post(resumes::handle_save_resume))
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        .route("/api/v1/resumes/:id/render", post(resumes::handle_render))
        .route("/api/v1/resumes/:id/pdf", get(resumes::handle_download_pdf))
        .route("/api/v1/resumes/:id/tex", get(resumes::handle_download_latex))
        // Reviewer annotations
        .route(
            "/api/v1/documents/:document_id/highlights",
            get(annotations::handle_get_highlights).put(annotations::handle_save_highlights),
        )
        .route(
            "/api/v1/documents/:document_id/reviews",
            get(annotations::handle_get_reviews),
        )
        .with_state(state)
}

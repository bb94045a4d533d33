use std::sync::Arc;

use crate::config::Config;
use crate::render::DocumentCompiler;
use crate::storage::{AnnotationRepository, ObjectStore, ResumeRepository};

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator sits behind a trait object so tests can swap in memory
/// implementations.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resumes: Arc<dyn ResumeRepository>,
    pub annotations: Arc<dyn AnnotationRepository>,
    pub objects: Arc<dyn ObjectStore>,
    pub compiler: Arc<dyn DocumentCompiler>,
}

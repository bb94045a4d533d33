use serde::Deserialize;
use tracing::info;

use crate::annotations::timestamps::first_highlight_created_at;
use crate::models::annotation::{AnnotationSet, HighlightMap, ReviewSummary, ANONYMOUS_REVIEWER};
use crate::storage::{AnnotationRepository, StoreError};

/// A full replacement of one reviewer's highlights.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveHighlights {
    #[serde(default)]
    pub highlights: HighlightMap,
    #[serde(default)]
    pub reviewer_id: Option<String>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
}

/// Highlights for `(document, reviewer)`, or for any reviewer of the document
/// when `reviewer_id` is absent. Empty when nothing is stored.
pub async fn get_highlights(
    repo: &dyn AnnotationRepository,
    document_id: &str,
    reviewer_id: Option<&str>,
) -> Result<HighlightMap, StoreError> {
    let reviewer_id = reviewer_id.map(str::trim).filter(|r| !r.is_empty());
    Ok(repo
        .find_one(document_id, reviewer_id)
        .await?
        .map(|set| set.highlights)
        .unwrap_or_default())
}

/// Every reviewer's set for the document, oldest first comment first. Sets
/// without any parseable timestamp sort before all others; ties keep
/// insertion order.
pub async fn get_all_reviews(
    repo: &dyn AnnotationRepository,
    document_id: &str,
) -> Result<Vec<ReviewSummary>, StoreError> {
    let mut sets = repo.find_for_document(document_id).await?;
    sets.sort_by_key(|s| s.first_highlight_created_at);
    Ok(sets.into_iter().map(ReviewSummary::from).collect())
}

/// Replaces the reviewer's highlight set wholesale, recomputing its sort key.
pub async fn save_highlights(
    repo: &dyn AnnotationRepository,
    document_id: &str,
    req: SaveHighlights,
) -> Result<AnnotationSet, StoreError> {
    let reviewer_id = req
        .reviewer_id
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    let reviewer_name = req
        .reviewer_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| ANONYMOUS_REVIEWER.to_string());

    let set = AnnotationSet {
        document_id: document_id.to_string(),
        first_highlight_created_at: first_highlight_created_at(&req.highlights),
        highlights: req.highlights,
        reviewer_id,
        reviewer_name,
    };

    repo.upsert(&set).await?;

    let count: usize = set.highlights.values().map(Vec::len).sum();
    info!(
        "Saved {count} highlights on document {} for reviewer {}",
        set.document_id,
        set.reviewer_id.as_deref().unwrap_or(ANONYMOUS_REVIEWER)
    );
    Ok(set)
}

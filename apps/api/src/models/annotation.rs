use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default display name for reviewers who did not identify themselves.
pub const ANONYMOUS_REVIEWER: &str = "Anonymous";

/// Page number (as a string key) → highlights on that page, in display order.
pub type HighlightMap = BTreeMap<String, Vec<Highlight>>;

/// One rectangle of a highlight, in page coordinates. Values are stored and
/// returned exactly as submitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A positioned comment anchored to zero or more rectangles on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rects: Vec<Rect>,
    /// Raw client timestamp. Parsed leniently when ordering reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
    /// Any additional client fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One reviewer's complete highlight collection for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub document_id: String,
    pub reviewer_id: Option<String>,
    pub reviewer_name: String,
    pub highlights: HighlightMap,
    /// Earliest parseable `created_at` across all highlights at save time.
    pub first_highlight_created_at: Option<DateTime<Utc>>,
}

/// One entry of the ordered review list shown to a document's owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub reviewer_id: Option<String>,
    pub reviewer_name: String,
    pub highlights: HighlightMap,
}

impl From<AnnotationSet> for ReviewSummary {
    fn from(set: AnnotationSet) -> Self {
        Self {
            reviewer_id: set.reviewer_id,
            reviewer_name: set.reviewer_name,
            highlights: set.highlights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_unknown_fields() {
        let json = r#"{
            "id": 1712345,
            "comment": "Tighten this",
            "text": "Built things",
            "rects": [],
            "color": "yellow"
        }"#;
        let highlight: Highlight = serde_json::from_str(json).unwrap();
        assert!(highlight.rects.is_empty());
        assert_eq!(highlight.extra.get("color"), Some(&Value::from("yellow")));

        let back = serde_json::to_value(&highlight).unwrap();
        assert_eq!(back["color"], "yellow");
        assert!(back.get("created_at").is_none());
    }

    #[test]
    fn test_rect_precision_survives_json() {
        let rect = Rect {
            x: 72.5,
            y: 150.25,
            width: 200.75,
            height: 14.5,
        };
        let json = serde_json::to_string(&rect).unwrap();
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back.x.to_bits(), rect.x.to_bits());
        assert_eq!(back.y.to_bits(), rect.y.to_bits());
        assert_eq!(back.width.to_bits(), rect.width.to_bits());
        assert_eq!(back.height.to_bits(), rect.height.to_bits());
    }
}

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::extract_resume;
use crate::extraction::sections::SectionKind;
use crate::models::resume::StructuredResume;
use crate::resumes::form::{to_form_prefill, FormPrefill};
use crate::storage::{ObjectHandle, ObjectStore};

#[derive(Debug, Serialize)]
pub struct UploadExtraction {
    pub upload: ObjectHandle,
    pub resume: StructuredResume,
    pub prefill: FormPrefill,
    pub sections: Vec<SectionKind>,
}

/// Stores an uploaded PDF and runs the heuristic extractor over its text.
///
/// Text extraction failures degrade to an empty extraction rather than an
/// error, so the caller still gets an (empty) form to fill in.
pub async fn extract_upload(
    objects: &dyn ObjectStore,
    bytes: Bytes,
    filename: &str,
) -> Result<UploadExtraction, AppError> {
    if !filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(format!(
            "Expected a .pdf file, got '{filename}'"
        )));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let upload = objects
        .put(bytes.clone(), filename, "application/pdf")
        .await?;

    let text = pdf_text(bytes).await;
    let extraction = extract_resume(&text);
    let found: Vec<&str> = extraction.sections.iter().map(|s| s.as_str()).collect();
    info!(
        "Extracted {} chars from {filename}: sections [{}]",
        text.len(),
        found.join(", ")
    );

    Ok(UploadExtraction {
        upload,
        prefill: to_form_prefill(&extraction.resume),
        resume: extraction.resume,
        sections: extraction.sections,
    })
}

/// Plain text of a PDF. pdf-extract can panic on malformed input, so it runs
/// on a blocking thread and any failure yields empty text.
async fn pdf_text(bytes: Bytes) -> String {
    match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF text extraction aborted: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryObjectStore;

    #[tokio::test]
    async fn test_rejects_non_pdf() {
        let objects = MemoryObjectStore::default();
        let err = extract_upload(&objects, Bytes::from_static(b"hello"), "resume.docx")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(objects.object_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_pdf_yields_empty_extraction() {
        let objects = MemoryObjectStore::default();
        let result = extract_upload(&objects, Bytes::from_static(b"not really a pdf"), "CV.PDF")
            .await
            .unwrap();
        assert_eq!(result.resume, StructuredResume::default());
        assert!(result.sections.is_empty());
        assert_eq!(objects.object_count(), 1);
    }
}

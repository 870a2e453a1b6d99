//! Resume batch pipeline: decode → extract → persist → (optionally) score, per file.
//!
//! Files are independent. Decoding runs on blocking threads concurrently; persistence and
//! scoring run in upload order. A failing file is logged and reported in
//! `BatchOutcome::failures` and never aborts its siblings.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::resume::{JobDescriptionRow, Resume};
use crate::screening::extractor::{extract_email, SkillCatalog};
use crate::screening::matcher::MatchScorer;
use crate::screening::similarity::MatchResult;
use crate::screening::store::{self, NewResume, StoreError};
use crate::screening::ScreeningError;

/// One uploaded file as received from the multipart form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Serialize)]
pub struct BatchFailure {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    pub processed: Vec<Resume>,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("file is not valid UTF-8 text")]
    NotUtf8,

    #[error("no text found in file")]
    Empty,

    #[error("decoder task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Scoring(#[from] ScreeningError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("resume {0} vanished before its score was recorded")]
    Vanished(Uuid),
}

/// Where processed resumes are written. `PgPool` in production.
#[async_trait]
pub trait ResumeSink: Send + Sync {
    async fn insert_resume(&self, resume: NewResume<'_>) -> Result<Resume, StoreError>;

    async fn record_match(
        &self,
        resume_id: Uuid,
        job_description_id: Uuid,
        result: &MatchResult,
    ) -> Result<Option<Resume>, StoreError>;
}

#[async_trait]
impl ResumeSink for PgPool {
    async fn insert_resume(&self, resume: NewResume<'_>) -> Result<Resume, StoreError> {
        store::insert_resume(self, resume).await
    }

    async fn record_match(
        &self,
        resume_id: Uuid,
        job_description_id: Uuid,
        result: &MatchResult,
    ) -> Result<Option<Resume>, StoreError> {
        store::record_match(self, resume_id, job_description_id, result).await
    }
}

/// Shared collaborators for one batch.
pub struct BatchContext<'a> {
    pub sink: &'a dyn ResumeSink,
    pub skills: &'a SkillCatalog,
    pub scorer: &'a dyn MatchScorer,
    pub job: Option<&'a JobDescriptionRow>,
    pub uploaded_by: Option<Uuid>,
}

pub async fn screen_batch(ctx: &BatchContext<'_>, uploads: Vec<ResumeUpload>) -> BatchOutcome {
    let total = uploads.len();

    let decoders: Vec<_> = uploads
        .into_iter()
        .map(|upload| {
            let file_name = upload.file_name.clone();
            let handle = tokio::task::spawn_blocking(move || decode_upload(&upload));
            (file_name, handle)
        })
        .collect();

    let mut outcome = BatchOutcome::default();

    for (file_name, handle) in decoders {
        let decoded = handle
            .await
            .unwrap_or_else(|e| Err(UploadError::Task(e.to_string())));

        let result = match decoded {
            Ok(text) => process_text(ctx, &file_name, &text).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(resume) => outcome.processed.push(resume),
            Err(e) => {
                warn!("Failed to process {file_name}: {e}");
                outcome.failures.push(BatchFailure {
                    file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Resume batch done: {}/{} processed, {} failed",
        outcome.processed.len(),
        total,
        outcome.failures.len()
    );
    outcome
}

async fn process_text(
    ctx: &BatchContext<'_>,
    file_name: &str,
    text: &str,
) -> Result<Resume, UploadError> {
    let fields = ctx.skills.extract(text);
    let candidate_name = candidate_name(file_name);
    let email = extract_email(text);

    let resume = ctx
        .sink
        .insert_resume(NewResume {
            candidate_name: &candidate_name,
            email: email.as_deref(),
            content: text,
            fields: &fields,
            uploaded_by: ctx.uploaded_by,
        })
        .await?;

    let Some(job) = ctx.job else {
        return Ok(resume);
    };

    let result = ctx.scorer.score(&job.description, &resume.content)?;
    ctx.sink
        .record_match(resume.id, job.id, &result)
        .await?
        .ok_or(UploadError::Vanished(resume.id))
}

/// Decodes an upload to text: PDFs through `pdf-extract`, anything else as UTF-8.
pub fn decode_upload(upload: &ResumeUpload) -> Result<String, UploadError> {
    let text = if is_pdf(upload) {
        pdf_extract::extract_text_from_mem(&upload.data)
            .map_err(|e| UploadError::Pdf(e.to_string()))?
    } else {
        String::from_utf8(upload.data.to_vec()).map_err(|_| UploadError::NotUtf8)?
    };

    if text.trim().is_empty() {
        return Err(UploadError::Empty);
    }
    Ok(text)
}

fn is_pdf(upload: &ResumeUpload) -> bool {
    upload.content_type.as_deref() == Some("application/pdf")
        || has_extension(&upload.file_name, "pdf")
}

fn has_extension(file_name: &str, ext: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// File name without its `.pdf` / `.txt` extension.
pub fn candidate_name(file_name: &str) -> String {
    if has_extension(file_name, "pdf") || has_extension(file_name, "txt") {
        if let Some(stem) = Path::new(file_name).file_stem().and_then(|s| s.to_str()) {
            return stem.to_string();
        }
    }
    file_name.to_string()
}

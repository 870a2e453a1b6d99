//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{JobDescriptionRow, ScreenedResume};
use crate::screening::batch::{screen_batch, BatchContext, BatchOutcome, ResumeUpload};
use crate::screening::extractor::ExtractedFields;
use crate::screening::similarity::{MatchCategory, MatchResult};
use crate::screening::store::{self, NewJobDescription};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job_text: String,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Strong,
    Weak,
    #[serde(rename = "none")]
    NoMatch,
}

impl CategoryFilter {
    pub fn category(self) -> Option<MatchCategory> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Strong => Some(MatchCategory::StrongMatch),
            CategoryFilter::Weak => Some(MatchCategory::WeakMatch),
            CategoryFilter::NoMatch => Some(MatchCategory::NoMatch),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListResumesQuery {
    #[serde(default)]
    pub category: CategoryFilter,
}

#[derive(Debug, Deserialize)]
pub struct ScoreResumeRequest {
    pub job_description_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ScoreResumeResponse {
    pub resume_id: Uuid,
    pub job_description_id: Uuid,
    pub match_result: MatchResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screening/score
///
/// Scores raw resume text against raw job text without touching the store.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<MatchResult>, AppError> {
    require_text("job_text", &request.job_text)?;
    require_text("resume_text", &request.resume_text)?;

    let result = state
        .match_scorer
        .score(&request.job_text, &request.resume_text)?;
    Ok(Json(result))
}

/// POST /api/v1/screening/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractedFields>, AppError> {
    require_text("resume_text", &request.resume_text)?;
    Ok(Json(state.skills.extract(&request.resume_text)))
}

/// POST /api/v1/screening/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobDescriptionRow>), AppError> {
    require_text("title", &request.title)?;
    require_text("description", &request.description)?;

    let required_skills = state
        .skills
        .extract_skills(&request.description)
        .into_iter()
        .collect();

    let row = store::insert_job_description(
        &state.db,
        NewJobDescription {
            title: request.title.trim(),
            description: &request.description,
            required_skills,
            created_by: request.created_by,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/screening/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobDescriptionRow>>, AppError> {
    Ok(Json(store::list_job_descriptions(&state.db).await?))
}

/// POST /api/v1/screening/resumes
///
/// Multipart upload: one or more `files` parts, optional `job_description_id` and
/// `uploaded_by` text parts. Each file is processed independently; per-file failures are
/// listed in the response instead of failing the request.
pub async fn handle_upload_resumes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchOutcome>, AppError> {
    let mut uploads = Vec::new();
    let mut job_description_id = None;
    let mut uploaded_by = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" | "file" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(String::from);
                let data = field.bytes().await?;
                uploads.push(ResumeUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            "job_description_id" => {
                job_description_id = Some(parse_uuid_field(&name, &field.text().await?)?);
            }
            "uploaded_by" => {
                uploaded_by = Some(parse_uuid_field(&name, &field.text().await?)?);
            }
            _ => {}
        }
    }

    if uploads.is_empty() {
        return Err(AppError::Validation(
            "at least one file is required".to_string(),
        ));
    }

    let job = match job_description_id {
        Some(id) => Some(
            store::get_job_description(&state.db, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))?,
        ),
        None => None,
    };

    let ctx = BatchContext {
        sink: &state.db,
        skills: state.skills.as_ref(),
        scorer: state.match_scorer.as_ref(),
        job: job.as_ref(),
        uploaded_by,
    };

    Ok(Json(screen_batch(&ctx, uploads).await))
}

/// GET /api/v1/screening/resumes?category=all|strong|weak|none
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<ListResumesQuery>,
) -> Result<Json<Vec<ScreenedResume>>, AppError> {
    let resumes = store::list_screened_resumes(&state.db, params.category.category()).await?;
    Ok(Json(resumes))
}

/// POST /api/v1/screening/resumes/:id/score
///
/// Re-scores a stored resume against a stored job description and persists the result.
pub async fn handle_score_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<ScoreResumeRequest>,
) -> Result<Json<ScoreResumeResponse>, AppError> {
    let resume = store::get_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let job = store::get_job_description(&state.db, request.job_description_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Job description {} not found",
                request.job_description_id
            ))
        })?;

    let result = state.match_scorer.score(&job.description, &resume.content)?;

    store::record_match(&state.db, resume.id, job.id, &result)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    Ok(Json(ScoreResumeResponse {
        resume_id,
        job_description_id: job.id,
        match_result: result,
    }))
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn parse_uuid_field(field: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::Validation(format!("{field} must be a UUID")))
}

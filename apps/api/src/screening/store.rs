//! Repository over the `job_descriptions` and `resumes` tables.
//!
//! Rows are decoded into typed `*Row` structs and validated into domain records here, so
//! nothing downstream sees a half-shaped row.

use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::resume::{
    JobDescriptionRow, Resume, ResumeRow, RowValidationError, ScreenedResume, ScreenedResumeRow,
};
use crate::screening::extractor::ExtractedFields;
use crate::screening::similarity::{MatchCategory, MatchResult};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid stored row: {0}")]
    InvalidRow(#[from] RowValidationError),
}

pub struct NewJobDescription<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub required_skills: Vec<String>,
    pub created_by: Option<Uuid>,
}

pub struct NewResume<'a> {
    pub candidate_name: &'a str,
    pub email: Option<&'a str>,
    pub content: &'a str,
    pub fields: &'a ExtractedFields,
    pub uploaded_by: Option<Uuid>,
}

pub async fn insert_job_description(
    pool: &PgPool,
    job: NewJobDescription<'_>,
) -> Result<JobDescriptionRow, StoreError> {
    let row = sqlx::query_as::<_, JobDescriptionRow>(
        r#"
        INSERT INTO job_descriptions (title, description, required_skills, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(job.title)
    .bind(job.description)
    .bind(job.required_skills)
    .bind(job.created_by)
    .fetch_one(pool)
    .await?;

    info!("Created job description {} ({})", row.id, row.title);
    Ok(row)
}

pub async fn list_job_descriptions(pool: &PgPool) -> Result<Vec<JobDescriptionRow>, StoreError> {
    Ok(sqlx::query_as::<_, JobDescriptionRow>(
        "SELECT * FROM job_descriptions ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn get_job_description(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<JobDescriptionRow>, StoreError> {
    Ok(
        sqlx::query_as::<_, JobDescriptionRow>("SELECT * FROM job_descriptions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn insert_resume(pool: &PgPool, resume: NewResume<'_>) -> Result<Resume, StoreError> {
    let skills: Vec<String> = resume.fields.skills.iter().cloned().collect();

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (candidate_name, email, content, skills, experience, education, uploaded_by)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(resume.candidate_name)
    .bind(resume.email)
    .bind(resume.content)
    .bind(skills)
    .bind(Json(&resume.fields.experience))
    .bind(Json(&resume.fields.education))
    .bind(resume.uploaded_by)
    .fetch_one(pool)
    .await?;

    Ok(Resume::try_from(row)?)
}

pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Option<Resume>, StoreError> {
    let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Resume::try_from).transpose()?)
}

/// Stores the latest match of a resume against a job description.
/// Returns `None` when the resume does not exist.
pub async fn record_match(
    pool: &PgPool,
    resume_id: Uuid,
    job_description_id: Uuid,
    result: &MatchResult,
) -> Result<Option<Resume>, StoreError> {
    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        UPDATE resumes
        SET match_score = $1, match_category = $2, job_description_id = $3
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(result.score)
    .bind(result.category.as_str())
    .bind(job_description_id)
    .bind(resume_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Resume::try_from).transpose()?)
}

/// Resumes joined with their job title, best score first. `None` lists every resume;
/// a category keeps only resumes scored into it.
pub async fn list_screened_resumes(
    pool: &PgPool,
    category: Option<MatchCategory>,
) -> Result<Vec<ScreenedResume>, StoreError> {
    let rows = sqlx::query_as::<_, ScreenedResumeRow>(
        r#"
        SELECT r.*, j.title AS job_title
        FROM resumes r
        LEFT JOIN job_descriptions j ON j.id = r.job_description_id
        WHERE ($1::text IS NULL OR r.match_category = $1)
        ORDER BY r.match_score DESC NULLS LAST, r.created_at DESC
        "#,
    )
    .bind(category.map(|c| c.as_str()))
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| ScreenedResume::try_from(row).map_err(StoreError::from))
        .collect()
}

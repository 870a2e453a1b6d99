use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::screening::extractor::{EducationBlock, ExperienceBlock};
use crate::screening::similarity::{MatchCategory, MatchResult};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobDescriptionRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Raw `resumes` row as stored. Convert with `Resume::try_from` before use.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub candidate_name: String,
    pub email: Option<String>,
    pub content: String,
    pub skills: Vec<String>,
    pub experience: Json<Vec<ExperienceBlock>>,
    pub education: Json<Vec<EducationBlock>>,
    pub match_score: Option<f64>,
    pub match_category: Option<String>,
    pub job_description_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Resume row joined with the title of the job description it was last scored against.
#[derive(Debug, Clone, FromRow)]
pub struct ScreenedResumeRow {
    #[sqlx(flatten)]
    pub resume: ResumeRow,
    pub job_title: Option<String>,
}

/// Validated resume record.
#[derive(Debug, Clone, Serialize)]
pub struct Resume {
    pub id: Uuid,
    pub candidate_name: String,
    pub email: Option<String>,
    pub content: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceBlock>,
    pub education: Vec<EducationBlock>,
    pub match_result: Option<MatchResult>,
    pub job_description_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenedResume {
    #[serde(flatten)]
    pub resume: Resume,
    pub job_title: Option<String>,
}

/// A stored row that does not decode into a valid record.
#[derive(Debug, thiserror::Error)]
pub enum RowValidationError {
    #[error("resume {id}: unknown match_category '{label}'")]
    UnknownCategory { id: Uuid, label: String },

    #[error("resume {id}: match_score and match_category must be set together")]
    PartialMatch { id: Uuid },
}

impl TryFrom<ResumeRow> for Resume {
    type Error = RowValidationError;

    fn try_from(row: ResumeRow) -> Result<Self, Self::Error> {
        let match_result = match (row.match_score, row.match_category.as_deref()) {
            (Some(score), Some(label)) => {
                let category = MatchCategory::parse(label).ok_or_else(|| {
                    RowValidationError::UnknownCategory {
                        id: row.id,
                        label: label.to_string(),
                    }
                })?;
                Some(MatchResult { score, category })
            }
            (None, None) => None,
            _ => return Err(RowValidationError::PartialMatch { id: row.id }),
        };

        Ok(Resume {
            id: row.id,
            candidate_name: row.candidate_name,
            email: row.email,
            content: row.content,
            skills: row.skills,
            experience: row.experience.0,
            education: row.education.0,
            match_result,
            job_description_id: row.job_description_id,
            uploaded_by: row.uploaded_by,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<ScreenedResumeRow> for ScreenedResume {
    type Error = RowValidationError;

    fn try_from(row: ScreenedResumeRow) -> Result<Self, Self::Error> {
        Ok(ScreenedResume {
            resume: Resume::try_from(row.resume)?,
            job_title: row.job_title,
        })
    }
}

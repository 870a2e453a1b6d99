//! Axum route handlers for the Quiz API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::quiz::generator::{generate_quiz, QuizRequest};
use crate::quiz::grading::{grade, QuizScore};
use crate::quiz::parser::{parse_quiz, QuizQuestion};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseQuizRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct GradeQuizRequest {
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub answers: Vec<Option<String>>,
}

/// POST /api/v1/quiz/parse
///
/// Parses quiz text the client already holds. 422 when no block is usable.
pub async fn handle_parse_quiz(
    Json(request): Json<ParseQuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }
    let questions = parse_quiz(&request.raw_text)?;
    Ok(Json(QuizResponse { questions }))
}

/// POST /api/v1/quiz/generate
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    let questions = generate_quiz(state.llm.as_ref(), &request).await?;
    Ok(Json(QuizResponse { questions }))
}

/// POST /api/v1/quiz/grade
pub async fn handle_grade_quiz(
    Json(request): Json<GradeQuizRequest>,
) -> Result<Json<QuizScore>, AppError> {
    if request.questions.is_empty() {
        return Err(AppError::Validation(
            "questions cannot be empty".to_string(),
        ));
    }
    Ok(Json(grade(&request.questions, &request.answers)))
}

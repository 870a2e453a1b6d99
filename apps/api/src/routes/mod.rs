pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::chat;
use crate::quiz::handlers as quiz;
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/health", get(health::health_handler))
        // Screening API
        .route("/api/v1/screening/score", post(screening::handle_score))
        .route("/api/v1/screening/extract", post(screening::handle_extract))
        .route(
            "/api/v1/screening/jobs",
            post(screening::handle_create_job).get(screening::handle_list_jobs),
        )
        .route(
            "/api/v1/screening/resumes",
            post(screening::handle_upload_resumes).get(screening::handle_list_resumes),
        )
        .route(
            "/api/v1/screening/resumes/:id/score",
            post(screening::handle_score_resume),
        )
        // Quiz API
        .route("/api/v1/quiz/parse", post(quiz::handle_parse_quiz))
        .route("/api/v1/quiz/generate", post(quiz::handle_generate_quiz))
        .route("/api/v1/quiz/grade", post(quiz::handle_grade_quiz))
        // Chat API
        .route("/api/v1/chat", post(chat::handle_chat))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

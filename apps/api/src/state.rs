use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::screening::extractor::SkillCatalog;
use crate::screening::matcher::MatchScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative-language backend. `LlmClient` (Gemini) in production.
    pub llm: Arc<dyn TextGenerator>,
    /// Pluggable resume/job scorer. Default: TfIdfMatchScorer.
    pub match_scorer: Arc<dyn MatchScorer>,
    /// Skill vocabulary used by extraction. `SKILL_CATALOG` overrides the built-in list.
    pub skills: Arc<SkillCatalog>,
    pub config: Config,
}

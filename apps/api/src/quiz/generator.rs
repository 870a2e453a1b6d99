//! Quiz generation: request → prompt → generative API → parsed questions.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::render_quiz_prompt;
use crate::llm_client::TextGenerator;
use crate::quiz::parser::{parse_quiz, QuizQuestion};

pub const MAX_QUESTIONS: u8 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Request body for quiz generation.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    pub course_name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_num_questions")]
    pub num_questions: u8,
}

fn default_num_questions() -> u8 {
    5
}

impl QuizRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.course_name.trim().is_empty() {
            return Err(AppError::Validation(
                "course_name cannot be empty".to_string(),
            ));
        }
        if !(1..=MAX_QUESTIONS).contains(&self.num_questions) {
            return Err(AppError::Validation(format!(
                "num_questions must be between 1 and {MAX_QUESTIONS}"
            )));
        }
        Ok(())
    }
}

/// Generates a quiz with a single generator call.
///
/// The returned list may be shorter than `num_questions`: malformed blocks are dropped by the
/// parser. Zero usable blocks is `AppError::QuizParse`.
pub async fn generate_quiz(
    generator: &dyn TextGenerator,
    request: &QuizRequest,
) -> Result<Vec<QuizQuestion>, AppError> {
    request.validate()?;

    let prompt = render_quiz_prompt(
        request.course_name.trim(),
        request.difficulty.as_str(),
        request.num_questions,
    );
    let raw = generator.generate(&prompt).await?;

    let questions = parse_quiz(&raw).inspect_err(|_| {
        warn!(
            "Quiz response for '{}' had no usable questions ({} chars)",
            request.course_name.trim(),
            raw.len()
        );
    })?;

    info!(
        "Generated quiz for '{}': {}/{} questions usable",
        request.course_name.trim(),
        questions.len(),
        request.num_questions
    );
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::CannedGenerator;

    const TWO_QUESTIONS: &str = "Question: What keyword declares an immutable binding?
Options:
A) var
B) let
C) const
D) mut
Correct Answer: B
Explanation: let bindings are immutable unless marked mut.

Question: Which trait enables the ? operator on Result conversions?
Options:
A) Into
B) AsRef
C) From
D) Deref
Correct Answer: C
Explanation: ? converts errors through From.";

    fn request(course_name: &str, num_questions: u8) -> QuizRequest {
        QuizRequest {
            course_name: course_name.to_string(),
            difficulty: Difficulty::Beginner,
            num_questions,
        }
    }

    #[test]
    fn test_request_defaults() {
        let req: QuizRequest = serde_json::from_str(r#"{"course_name": "Rust"}"#).unwrap();
        assert_eq!(req.difficulty, Difficulty::Intermediate);
        assert_eq!(req.num_questions, 5);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_request_validation() {
        assert!(request("  ", 5).validate().is_err());
        assert!(request("Rust", 0).validate().is_err());
        assert!(request("Rust", 21).validate().is_err());
        assert!(request("Rust", 20).validate().is_ok());
    }

    #[test]
    fn test_unknown_difficulty_rejected() {
        let parsed =
            serde_json::from_str::<QuizRequest>(r#"{"course_name": "Rust", "difficulty": "expert"}"#);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn test_generate_quiz_parses_reply() {
        let generator = CannedGenerator::replying(TWO_QUESTIONS);
        let questions = generate_quiz(&generator, &request("Rust Basics", 2))
            .await
            .unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].correct_answer, "From");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"Rust Basics\""));
        assert!(prompts[0].contains("beginner level with 2 questions"));
    }

    #[tokio::test]
    async fn test_generate_quiz_unparseable_reply() {
        let generator = CannedGenerator::replying("I'd rather not.");
        let err = generate_quiz(&generator, &request("Rust", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::QuizParse(_)));
    }

    #[tokio::test]
    async fn test_generate_quiz_invalid_request_skips_generator() {
        let generator = CannedGenerator::replying(TWO_QUESTIONS);
        let err = generate_quiz(&generator, &request("", 3)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_quiz_upstream_failure() {
        let err = generate_quiz(&CannedGenerator::empty(), &request("Rust", 3))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}

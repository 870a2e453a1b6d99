//! Quiz-response parser: free text from the generative API → validated `QuizQuestion`s.
//!
//! Expected block shape (one per question):
//!
//! ```text
//! Question: What does `cargo check` do?
//! Options:
//! A) Builds and runs tests
//! B) Type-checks without producing a binary
//! C) Formats the code
//! D) Publishes the crate
//! Correct Answer: B
//! Explanation: It runs the compiler front-end only.
//! ```
//!
//! Blocks missing a field or with an option count other than four are dropped; only an
//! input yielding no question at all is an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const QUESTION_MARKER: &str = "Question:";
const OPTIONS_MARKER: &str = "Options:";
const CORRECT_ANSWER_MARKER: &str = "Correct Answer:";
const EXPLANATION_MARKER: &str = "Explanation:";

static OPTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-D]\)").expect("valid regex"));

static CORRECT_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Correct Answer:\s*([A-D])").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedQuizQuestion")]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; 4],
    /// Always one of `options`.
    pub correct_answer: String,
    pub explanation: String,
}

/// Wire shape of a question sent back by a client, checked before it becomes a `QuizQuestion`.
#[derive(Deserialize)]
struct UncheckedQuizQuestion {
    question: String,
    options: [String; 4],
    correct_answer: String,
    explanation: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidQuestion {
    #[error("correct_answer '{0}' is not one of the options")]
    AnswerNotAnOption(String),
}

impl TryFrom<UncheckedQuizQuestion> for QuizQuestion {
    type Error = InvalidQuestion;

    fn try_from(raw: UncheckedQuizQuestion) -> Result<Self, Self::Error> {
        if raw.correct_answer.is_empty() || !raw.options.contains(&raw.correct_answer) {
            return Err(InvalidQuestion::AnswerNotAnOption(raw.correct_answer));
        }
        Ok(QuizQuestion {
            question: raw.question,
            options: raw.options,
            correct_answer: raw.correct_answer,
            explanation: raw.explanation,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizParseError {
    #[error("no valid quiz questions found in response")]
    NoQuestions,
}

/// Why a single block was dropped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockRejection {
    #[error("missing question text")]
    MissingQuestion,

    #[error("expected 4 options, found {0}")]
    OptionCount(usize),

    #[error("missing or unusable correct answer")]
    MissingCorrectAnswer,

    #[error("missing explanation")]
    MissingExplanation,
}

/// Parses every block of `raw`, keeping the well-formed ones in order.
pub fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>, QuizParseError> {
    let questions: Vec<QuizQuestion> = question_blocks(raw)
        .enumerate()
        .filter_map(|(idx, block)| match parse_block(block) {
            Ok(question) => Some(question),
            Err(reason) => {
                debug!("Dropping quiz block {idx}: {reason}");
                None
            }
        })
        .collect();

    if questions.is_empty() {
        return Err(QuizParseError::NoQuestions);
    }
    Ok(questions)
}

/// Text after each `Question:` marker up to the next one. Any preamble before the first
/// marker is not a block.
fn question_blocks(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(QUESTION_MARKER)
        .skip(1)
        .filter(|block| !block.trim().is_empty())
}

pub fn parse_block(block: &str) -> Result<QuizQuestion, BlockRejection> {
    let question_end = block.find(OPTIONS_MARKER).unwrap_or(block.len());
    let question = block[..question_end].trim();
    if question.is_empty() {
        return Err(BlockRejection::MissingQuestion);
    }

    let options: [String; 4] = parse_options(block)
        .try_into()
        .map_err(|found: Vec<String>| BlockRejection::OptionCount(found.len()))?;

    let correct_answer = CORRECT_ANSWER
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|letter| letter.as_str().bytes().next())
        .map(|letter| options[usize::from(letter - b'A')].clone())
        .filter(|answer| !answer.is_empty())
        .ok_or(BlockRejection::MissingCorrectAnswer)?;

    let explanation = block
        .find(EXPLANATION_MARKER)
        .map(|start| block[start + EXPLANATION_MARKER.len()..].trim())
        .filter(|text| !text.is_empty())
        .ok_or(BlockRejection::MissingExplanation)?;

    Ok(QuizQuestion {
        question: question.to_string(),
        options,
        correct_answer,
        explanation: explanation.to_string(),
    })
}

/// Option texts inside the `Options:` section, each running to the next `A)`–`D)` label,
/// `Correct Answer:` or the end of the block.
fn parse_options(block: &str) -> Vec<String> {
    let Some(start) = block.find(OPTIONS_MARKER) else {
        return Vec::new();
    };
    let section = &block[start + OPTIONS_MARKER.len()..];
    let section = match section.find(CORRECT_ANSWER_MARKER) {
        Some(end) => &section[..end],
        None => section,
    };

    let labels: Vec<_> = OPTION_LABEL.find_iter(section).collect();
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let end = labels.get(i + 1).map_or(section.len(), |next| next.start());
            section[label.end()..end].trim().to_string()
        })
        .collect()
}

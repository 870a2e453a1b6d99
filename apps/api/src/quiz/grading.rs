use serde::Serialize;

use crate::quiz::parser::QuizQuestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub unanswered: usize,
}

/// Grades positional answers against `questions`.
///
/// An answer counts only when it equals the question's `correct_answer` exactly. Missing
/// (including a short `answers` slice) or blank answers are unanswered. Extra answers are ignored.
pub fn grade(questions: &[QuizQuestion], answers: &[Option<String>]) -> QuizScore {
    let mut score = QuizScore {
        correct: 0,
        total: questions.len(),
        unanswered: 0,
    };

    for (idx, question) in questions.iter().enumerate() {
        match answers.get(idx).and_then(Option::as_deref).map(str::trim) {
            None | Some("") => score.unanswered += 1,
            Some(answer) if answer == question.correct_answer => score.correct += 1,
            Some(_) => {}
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: "Pick one".to_string(),
            options: ["Alpha", "Beta", "Gamma", "Delta"].map(String::from),
            correct_answer: correct.to_string(),
            explanation: "Because.".to_string(),
        }
    }

    fn answers(raw: &[Option<&str>]) -> Vec<Option<String>> {
        raw.iter().map(|a| a.map(String::from)).collect()
    }

    #[test]
    fn test_grade_counts_exact_matches() {
        let questions = vec![question("Alpha"), question("Beta"), question("Gamma")];
        let score = grade(
            &questions,
            &answers(&[Some("Alpha"), Some("Delta"), Some("Gamma")]),
        );
        assert_eq!(
            score,
            QuizScore {
                correct: 2,
                total: 3,
                unanswered: 0
            }
        );
    }

    #[test]
    fn test_grade_is_case_sensitive() {
        let score = grade(&[question("Alpha")], &answers(&[Some("alpha")]));
        assert_eq!(score.correct, 0);
        assert_eq!(score.unanswered, 0);
    }

    #[test]
    fn test_missing_and_blank_answers_are_unanswered() {
        let questions = vec![question("Alpha"), question("Beta"), question("Gamma")];
        let score = grade(&questions, &answers(&[None, Some("  ")]));
        assert_eq!(score.correct, 0);
        assert_eq!(score.unanswered, 3);
    }

    #[test]
    fn test_extra_answers_ignored() {
        let score = grade(&[question("Beta")], &answers(&[Some("Beta"), Some("Beta")]));
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 1);
    }

    #[test]
    fn test_empty_quiz() {
        assert_eq!(
            grade(&[], &[]),
            QuizScore {
                correct: 0,
                total: 0,
                unanswered: 0
            }
        );
    }
}

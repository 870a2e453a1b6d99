//! Match scoring: pluggable scorer that rates a resume against a job description.
//!
//! Default: `TfIdfMatchScorer` (tokenize → two-document TF-IDF corpus → Euclidean distance).
//! `AppState` holds an `Arc<dyn MatchScorer>` so handlers never name a concrete backend.

use crate::screening::similarity::{score_vectors, MatchResult};
use crate::screening::tfidf::TfIdfCorpus;
use crate::screening::ScreeningError;

/// Implement this to swap scoring backends without touching handlers or the batch pipeline.
pub trait MatchScorer: Send + Sync {
    fn score(&self, job_text: &str, resume_text: &str) -> Result<MatchResult, ScreeningError>;

    /// Short label exposed in logs.
    fn backend(&self) -> &'static str;
}

/// Builds a fresh corpus per comparison: job description at index 0, resume at index 1.
pub struct TfIdfMatchScorer;

impl MatchScorer for TfIdfMatchScorer {
    fn score(&self, job_text: &str, resume_text: &str) -> Result<MatchResult, ScreeningError> {
        let mut corpus = TfIdfCorpus::new();
        let job_idx = corpus.add_document(job_text);
        let resume_idx = corpus.add_document(resume_text);

        let job_vector = corpus.vector_for(job_idx)?;
        let resume_vector = corpus.vector_for(resume_idx)?;

        score_vectors(&job_vector, &resume_vector)
    }

    fn backend(&self) -> &'static str {
        "tfidf-euclidean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::similarity::MatchCategory;

    const JOB: &str = "Looking for a Python developer with SQL experience";
    const RESUME: &str = "Experienced Python developer skilled in SQL and machine learning";

    #[test]
    fn test_pipeline_is_deterministic() {
        let scorer = TfIdfMatchScorer;
        let first = scorer.score(JOB, RESUME).unwrap();
        let second = scorer.score(JOB, RESUME).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_documents_score_zero() {
        // every term appears in both documents, so every idf is ln(1) = 0
        let result = TfIdfMatchScorer.score(JOB, JOB).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.category, MatchCategory::NoMatch);
    }

    #[test]
    fn test_example_pair_score_matches_hand_computation() {
        // job-only terms: looking, for, a, with, experience (5 of 8 tokens)
        // resume-only terms: experienced, skilled, in, and, machine, learning (6 of 9 tokens)
        let ln2 = std::f64::consts::LN_2;
        let job_part = 5.0 * (ln2 / 8.0).powi(2);
        let resume_part = 6.0 * (ln2 / 9.0).powi(2);
        let expected = (job_part + resume_part).sqrt();

        let result = TfIdfMatchScorer.score(JOB, RESUME).unwrap();
        assert!((result.score - expected).abs() < 1e-12, "got {}", result.score);
        assert_eq!(result.category, MatchCategory::NoMatch);
    }

    #[test]
    fn test_disjoint_short_documents_categorize_strong() {
        // ln2 * sqrt(2) ≈ 0.98 with one token each
        let result = TfIdfMatchScorer.score("rust", "cobol").unwrap();
        assert!((result.score - std::f64::consts::LN_2 * 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(result.category, MatchCategory::StrongMatch);
    }

    #[test]
    fn test_empty_resume_does_not_fault() {
        let result = TfIdfMatchScorer.score(JOB, "").unwrap();
        assert!(result.score.is_finite());
    }

    #[test]
    fn test_backend_label() {
        assert_eq!(TfIdfMatchScorer.backend(), "tfidf-euclidean");
    }
}

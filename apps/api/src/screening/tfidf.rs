//! TF-IDF corpus used to vectorize a job description and a resume side by side.
//!
//! Every vector produced by one corpus shares the same vocabulary (all distinct terms of
//! all documents, in first-seen order), so positions line up for the scorer.

use std::collections::HashMap;

use serde::Serialize;

use crate::screening::tokenizer::tokenize;
use crate::screening::ScreeningError;

/// One TF-IDF weight per vocabulary term.
pub type WeightVector = Vec<f64>;

/// A vocabulary term paired with its TF-IDF weight in one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

struct TokenizedDocument {
    len: usize,
    counts: HashMap<String, usize>,
}

/// Ordered collection of tokenized documents. Rebuilt per comparison.
#[derive(Default)]
pub struct TfIdfCorpus {
    documents: Vec<TokenizedDocument>,
    vocabulary: Vec<String>,
    vocabulary_index: HashMap<String, usize>,
    /// Number of documents containing each vocabulary term, indexed like `vocabulary`.
    document_frequency: Vec<usize>,
}

impl TfIdfCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes `text` and appends it. Returns the new document's index.
    pub fn add_document(&mut self, text: &str) -> usize {
        let tokens = tokenize(text);
        let mut counts: HashMap<String, usize> = HashMap::new();

        for token in &tokens {
            if !self.vocabulary_index.contains_key(token) {
                self.vocabulary_index
                    .insert(token.clone(), self.vocabulary.len());
                self.vocabulary.push(token.clone());
                self.document_frequency.push(0);
            }
            *counts.entry(token.clone()).or_insert(0) += 1;
        }

        for term in counts.keys() {
            if let Some(&idx) = self.vocabulary_index.get(term) {
                self.document_frequency[idx] += 1;
            }
        }

        self.documents.push(TokenizedDocument {
            len: tokens.len(),
            counts,
        });
        self.documents.len() - 1
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Distinct terms across the corpus, first-seen order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Term frequency: occurrences / document length. 0 for an empty document.
    pub fn tf(&self, term: &str, index: usize) -> Result<f64, ScreeningError> {
        let doc = self.document(index)?;
        Ok(term_frequency(doc, term))
    }

    /// `ln(N / df)` with `df` floored at 1. The floor keeps unseen terms finite; it is not
    /// add-one smoothing.
    pub fn idf(&self, term: &str) -> f64 {
        let df = self
            .vocabulary_index
            .get(term)
            .map(|&idx| self.document_frequency[idx])
            .unwrap_or(0);
        self.idf_from_df(df)
    }

    /// TF-IDF weight of every vocabulary term for the document at `index`.
    pub fn term_weights(&self, index: usize) -> Result<Vec<TermWeight>, ScreeningError> {
        self.document(index)?;
        self.vocabulary()
            .iter()
            .map(|term| {
                Ok(TermWeight {
                    term: term.clone(),
                    weight: self.tf(term, index)? * self.idf(term),
                })
            })
            .collect()
    }

    /// Weight vector for the document at `index`, aligned with [`Self::vocabulary`].
    pub fn vector_for(&self, index: usize) -> Result<WeightVector, ScreeningError> {
        Ok(self
            .term_weights(index)?
            .into_iter()
            .map(|tw| tw.weight)
            .collect())
    }

    fn document(&self, index: usize) -> Result<&TokenizedDocument, ScreeningError> {
        self.documents
            .get(index)
            .ok_or(ScreeningError::DocumentOutOfRange {
                index,
                len: self.len(),
            })
    }

    fn idf_from_df(&self, df: usize) -> f64 {
        (self.len() as f64 / df.max(1) as f64).ln()
    }
}

fn term_frequency(doc: &TokenizedDocument, term: &str) -> f64 {
    if doc.len == 0 {
        return 0.0;
    }
    let count = doc.counts.get(term).copied().unwrap_or(0);
    count as f64 / doc.len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const LN_2: f64 = std::f64::consts::LN_2;

    fn two_doc_corpus(a: &str, b: &str) -> TfIdfCorpus {
        let mut corpus = TfIdfCorpus::new();
        corpus.add_document(a);
        corpus.add_document(b);
        corpus
    }

    #[test]
    fn test_add_document_returns_insertion_index() {
        let mut corpus = TfIdfCorpus::new();
        assert_eq!(corpus.add_document("first"), 0);
        assert_eq!(corpus.add_document("second"), 1);
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_vocabulary_is_first_seen_order() {
        let corpus = two_doc_corpus("rust go rust", "python rust sql");
        assert_eq!(corpus.vocabulary(), &["rust", "go", "python", "sql"]);
    }

    #[test]
    fn test_vectors_share_length() {
        let corpus = two_doc_corpus(
            "Looking for a Python developer",
            "Experienced Python developer skilled in SQL and machine learning",
        );
        let a = corpus.vector_for(0).unwrap();
        let b = corpus.vector_for(1).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), corpus.vocabulary().len());
    }

    #[test]
    fn test_term_in_both_documents_has_zero_idf() {
        let corpus = two_doc_corpus("rust python", "rust sql");
        assert_eq!(corpus.idf("rust"), 0.0);
        assert!((corpus.idf("python") - LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_unseen_term_uses_floor_of_one() {
        let corpus = two_doc_corpus("rust", "go");
        assert!((corpus.idf("haskell") - LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_tf_is_count_over_length() {
        let corpus = two_doc_corpus("rust rust go sql", "go");
        assert!((corpus.tf("rust", 0).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(corpus.tf("python", 0).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_document_has_zero_tf() {
        let corpus = two_doc_corpus("", "rust go");
        assert_eq!(corpus.tf("rust", 0).unwrap(), 0.0);
        let v = corpus.vector_for(0).unwrap();
        assert_eq!(v.len(), 2);
        assert!(v.iter().all(|w| *w == 0.0));
    }

    #[test]
    fn test_weights_match_hand_computation() {
        // doc0: [rust, go], doc1: [rust, sql, sql]
        let corpus = two_doc_corpus("rust go", "rust sql sql");
        let weights = corpus.term_weights(1).unwrap();
        assert_eq!(weights[0].term, "rust");
        assert_eq!(weights[0].weight, 0.0);
        assert_eq!(weights[1].term, "go");
        assert_eq!(weights[1].weight, 0.0);
        assert_eq!(weights[2].term, "sql");
        assert!((weights[2].weight - (2.0 / 3.0) * LN_2).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_index() {
        let corpus = two_doc_corpus("a", "b");
        assert_eq!(
            corpus.vector_for(2),
            Err(ScreeningError::DocumentOutOfRange { index: 2, len: 2 })
        );
        assert!(TfIdfCorpus::new().tf("x", 0).is_err());
    }

    #[test]
    fn test_term_weights_are_tf_times_idf() {
        let corpus = two_doc_corpus("python python sql", "python rust");
        for index in 0..corpus.len() {
            for tw in corpus.term_weights(index).unwrap() {
                let expected = corpus.tf(&tw.term, index).unwrap() * corpus.idf(&tw.term);
                assert_eq!(tw.weight, expected);
            }
        }
        assert_eq!(
            TfIdfCorpus::new().term_weights(0),
            Err(ScreeningError::DocumentOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_adding_document_extends_vocabulary_for_all_vectors() {
        let mut corpus = two_doc_corpus("rust", "go");
        let before = corpus.vector_for(0).unwrap().len();
        corpus.add_document("python");
        assert_eq!(corpus.vector_for(0).unwrap().len(), before + 1);
        assert_eq!(corpus.vector_for(2).unwrap().len(), before + 1);
    }
}

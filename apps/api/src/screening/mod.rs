// Resume screening: tokenizer -> TF-IDF corpus -> Euclidean scorer, plus section extraction.
// The core modules are synchronous and pure. Store access and HTTP live in store.rs,
// batch.rs and handlers.rs.

pub mod batch;
pub mod extractor;
pub mod handlers;
pub mod matcher;
pub mod similarity;
pub mod store;
pub mod tfidf;
pub mod tokenizer;

use thiserror::Error;

/// Malformed-input errors from the scoring core. Fatal to the single call, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreeningError {
    #[error("vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("document index {index} out of range for corpus of {len}")]
    DocumentOutOfRange { index: usize, len: usize },
}

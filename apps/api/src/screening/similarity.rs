//! Euclidean scorer and match categories.
//!
//! NOTE: the score is a raw Euclidean *distance* but the category thresholds read it as
//! "higher is better". Kept as-is until product intent is settled.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::screening::ScreeningError;

const STRONG_MATCH_THRESHOLD: f64 = 0.7;
const WEAK_MATCH_THRESHOLD: f64 = 0.4;

/// Discrete bucket derived from a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchCategory {
    #[serde(rename = "Strong Match")]
    StrongMatch,
    #[serde(rename = "Weak Match")]
    WeakMatch,
    #[serde(rename = "No Match")]
    NoMatch,
}

impl MatchCategory {
    /// score > 0.7 → Strong, 0.4 < score ≤ 0.7 → Weak, otherwise No Match.
    pub fn from_score(score: f64) -> Self {
        if score > STRONG_MATCH_THRESHOLD {
            MatchCategory::StrongMatch
        } else if score > WEAK_MATCH_THRESHOLD {
            MatchCategory::WeakMatch
        } else {
            MatchCategory::NoMatch
        }
    }

    /// Label used on the wire and in the `resumes.match_category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchCategory::StrongMatch => "Strong Match",
            MatchCategory::WeakMatch => "Weak Match",
            MatchCategory::NoMatch => "No Match",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Strong Match" => Some(MatchCategory::StrongMatch),
            "Weak Match" => Some(MatchCategory::WeakMatch),
            "No Match" => Some(MatchCategory::NoMatch),
            _ => None,
        }
    }
}

impl fmt::Display for MatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub category: MatchCategory,
}

/// `sqrt(Σ (a_i - b_i)²)`. Both vectors must come from the same corpus snapshot.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64, ScreeningError> {
    if a.len() != b.len() {
        return Err(ScreeningError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt())
}

pub fn score_vectors(a: &[f64], b: &[f64]) -> Result<MatchResult, ScreeningError> {
    let score = euclidean_distance(a, b)?;
    Ok(MatchResult {
        score,
        category: MatchCategory::from_score(score),
    })
}

//! Best-effort field extraction from raw resume text: known skills by substring lookup,
//! experience/education spans by marker. Nothing here fails; a miss is an empty result.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const EXPERIENCE_PLACEHOLDER_TITLE: &str = "Extracted Experience";
pub const EDUCATION_PLACEHOLDER_DEGREE: &str = "Extracted Education";

const DEFAULT_SKILLS: &[&str] = &[
    "javascript",
    "python",
    "java",
    "react",
    "node.js",
    "sql",
    "machine learning",
    "data analysis",
    "project management",
];

static EXPERIENCE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)experience:(.*?)education:").expect("valid regex"));

static EDUCATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)education:").expect("valid regex"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceBlock {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationBlock {
    pub degree: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub skills: BTreeSet<String>,
    pub experience: Vec<ExperienceBlock>,
    pub education: Vec<EducationBlock>,
}

/// Reference list of skill phrases matched against resume and job text.
#[derive(Debug, Clone)]
pub struct SkillCatalog {
    skills: Vec<String>,
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillCatalog {
    /// Builds a catalog from phrases; entries are trimmed, lowercased and deduplicated,
    /// blanks dropped.
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty() && seen.insert(s.clone()))
            .collect();
        Self { skills }
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Catalog entries that occur as a case-insensitive substring of `text`.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let haystack = text.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| haystack.contains(skill.as_str()))
            .cloned()
            .collect()
    }

    pub fn extract(&self, text: &str) -> ExtractedFields {
        ExtractedFields {
            skills: self.extract_skills(text),
            experience: extract_experience(text),
            education: extract_education(text),
        }
    }
}

/// Text between the first `experience:` and the following `education:`.
pub fn extract_experience(text: &str) -> Vec<ExperienceBlock> {
    EXPERIENCE_SECTION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|span| {
            vec![ExperienceBlock {
                title: EXPERIENCE_PLACEHOLDER_TITLE.to_string(),
                description: span.as_str().trim().to_string(),
            }]
        })
        .unwrap_or_default()
}

/// Text after the last `education:` marker.
pub fn extract_education(text: &str) -> Vec<EducationBlock> {
    EDUCATION_MARKER
        .find_iter(text)
        .last()
        .map(|marker| {
            vec![EducationBlock {
                degree: EDUCATION_PLACEHOLDER_DEGREE.to_string(),
                description: text[marker.end()..].trim().to_string(),
            }]
        })
        .unwrap_or_default()
}

/// First email-looking address in the text, used as the candidate's contact.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\nSummary: backend engineer.\n\
        EXPERIENCE:\n  Acme Corp - built Python services\n  Globex - SQL tuning\n\
        Education:\n  BSc Computer Science, 2019";

    #[test]
    fn test_extract_skills_case_insensitive() {
        let catalog = SkillCatalog::default();
        let skills = catalog.extract_skills("I know Python and SQL");
        assert!(skills.contains("python"));
        assert!(skills.contains("sql"));
    }

    #[test]
    fn test_extract_skills_exact_substring_only() {
        let catalog = SkillCatalog::new(["machine learning"]);
        assert!(catalog.extract_skills("machine-learning expert").is_empty());
        assert_eq!(catalog.extract_skills("Machine Learning expert").len(), 1);
    }

    #[test]
    fn test_java_also_matches_inside_javascript() {
        let skills = SkillCatalog::default().extract_skills("Senior JavaScript developer");
        assert!(skills.contains("javascript"));
        assert!(skills.contains("java"));
    }

    #[test]
    fn test_catalog_normalizes_entries() {
        let catalog = SkillCatalog::new([" Rust ", "rust", "", "Go"]);
        assert_eq!(catalog.skills(), &["rust", "go"]);
    }

    #[test]
    fn test_extract_experience_span() {
        let blocks = extract_experience(RESUME);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, EXPERIENCE_PLACEHOLDER_TITLE);
        assert!(blocks[0].description.starts_with("Acme Corp"));
        assert!(blocks[0].description.ends_with("SQL tuning"));
    }

    #[test]
    fn test_extract_experience_requires_education_marker() {
        assert!(extract_experience("Experience: ten years of Rust").is_empty());
        assert!(extract_experience("no markers at all").is_empty());
    }

    #[test]
    fn test_extract_education_after_last_marker() {
        let text = "Education: see below\nExperience: x\nEducation: MSc Physics";
        let blocks = extract_education(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].degree, EDUCATION_PLACEHOLDER_DEGREE);
        assert_eq!(blocks[0].description, "MSc Physics");
    }

    #[test]
    fn test_extract_education_missing() {
        assert!(extract_education("Experience: lots").is_empty());
    }

    #[test]
    fn test_extract_email() {
        assert_eq!(
            extract_email("Jane Doe | jane.doe+cv@example.co.uk | 555-0100"),
            Some("jane.doe+cv@example.co.uk".to_string())
        );
        assert_eq!(extract_email("no contact details"), None);
    }

    #[test]
    fn test_extract_combines_fields() {
        let fields = SkillCatalog::default().extract(RESUME);
        assert!(fields.skills.contains("python"));
        assert!(fields.skills.contains("sql"));
        assert_eq!(fields.experience.len(), 1);
        assert_eq!(fields.education[0].description, "BSc Computer Science, 2019");
    }
}

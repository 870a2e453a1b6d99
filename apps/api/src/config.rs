use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Comma-separated `SKILL_CATALOG`; `None` uses the built-in list.
    pub skill_catalog: Option<Vec<String>>,
    pub max_upload_mb: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_catalog: std::env::var("SKILL_CATALOG")
                .ok()
                .and_then(|raw| parse_skill_list(&raw)),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?,
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_skill_list(raw: &str) -> Option<Vec<String>> {
    let skills: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    (!skills.is_empty()).then_some(skills)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skill_list() {
        assert_eq!(
            parse_skill_list(" rust, go ,,kubernetes "),
            Some(vec![
                "rust".to_string(),
                "go".to_string(),
                "kubernetes".to_string()
            ])
        );
        assert_eq!(parse_skill_list(" , "), None);
    }

    #[test]
    fn test_max_upload_bytes() {
        let config = Config {
            database_url: String::new(),
            gemini_api_key: String::new(),
            port: 8080,
            rust_log: "info".to_string(),
            skill_catalog: None,
            max_upload_mb: 2,
        };
        assert_eq!(config.max_upload_bytes(), 2 * 1024 * 1024);
    }
}

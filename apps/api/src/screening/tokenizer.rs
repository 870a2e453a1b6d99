//! Tokenizer: lowercases text, strips everything that is not an ASCII alphanumeric or
//! whitespace, then splits on whitespace.

/// Splits `text` into lowercase alphanumeric tokens. Never fails; empty or
/// whitespace-only input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

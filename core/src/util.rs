//! Shared validation helpers for values that end up in HTTP requests

use crate::error::{AskaiError, Result};

/// Check that a value can be placed in an HTTP header
///
/// Header values cannot contain control characters (including newlines,
/// carriage returns and NUL) or DEL.
pub fn sanitize_for_header(value: &str, field_name: &str) -> Result<String> {
    if value.is_empty() {
        return Err(AskaiError::config(format!("{} cannot be empty", field_name)));
    }

    if let Some((index, ch)) = value.char_indices().find(|(_, ch)| ch.is_control()) {
        return Err(AskaiError::config(format!(
            "{} contains invalid character at position {} ({:?})",
            field_name, index, ch
        )));
    }

    Ok(value.to_string())
}

/// Validate an API key for use in an Authorization header
///
/// Returns the trimmed key. A blank key is the "API Key is required"
/// configuration error.
pub fn validate_api_key(api_key: &str) -> Result<String> {
    let trimmed = api_key.trim();

    if trimmed.is_empty() {
        return Err(AskaiError::config("API Key is required"));
    }

    sanitize_for_header(trimmed, "API key")?;

    format!("Bearer {}", trimmed)
        .parse::<reqwest::header::HeaderValue>()
        .map_err(|_| {
            AskaiError::config(format!(
                "API key results in an invalid Authorization header (length {})",
                trimmed.len()
            ))
        })?;

    Ok(trimmed.to_string())
}

/// Sanitize a base URL for API requests
///
/// Returns the trimmed URL without a trailing slash.
pub fn sanitize_base_url(url: &str, field_name: &str) -> Result<String> {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return Err(AskaiError::config(format!("{} cannot be empty", field_name)));
    }

    // Encoded separators usually mean the value was double-encoded somewhere.
    if trimmed.contains("%2F") || trimmed.contains("%3D") || trimmed.contains("%20") {
        return Err(AskaiError::config(format!(
            "{} appears to contain URL-encoded characters (e.g. %2F, %3D, %20)",
            field_name
        )));
    }

    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(AskaiError::config(format!(
            "{} must start with 'http://' or 'https://'. Got: {}",
            field_name, trimmed
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_for_header_valid() {
        assert!(sanitize_for_header("abc123", "test").is_ok());
        assert!(sanitize_for_header("sk-abc123xyz", "test").is_ok());
        assert!(sanitize_for_header("hello world", "test").is_ok());
    }

    #[test]
    fn test_sanitize_for_header_invalid() {
        assert!(sanitize_for_header("abc\n123", "test").is_err());
        assert!(sanitize_for_header("abc\r123", "test").is_err());
        assert!(sanitize_for_header("abc\x00123", "test").is_err());
        assert!(sanitize_for_header("abc\x1f123", "test").is_err());
        assert!(sanitize_for_header("abc\x7f123", "test").is_err());
    }

    #[test]
    fn test_validate_api_key() {
        assert_eq!(validate_api_key("  sk-test123 ").unwrap(), "sk-test123");
        assert!(matches!(validate_api_key(""), Err(AskaiError::Config { .. })));
        assert!(matches!(validate_api_key(" \n "), Err(AskaiError::Config { .. })));
        assert!(validate_api_key("sk-te\nst").is_err());
    }

    #[test]
    fn test_sanitize_base_url() {
        assert_eq!(
            sanitize_base_url("https://api.openai.com/v1/", "url").unwrap(),
            "https://api.openai.com/v1"
        );
        assert!(sanitize_base_url("http://localhost:11434/v1", "url").is_ok());
        assert!(sanitize_base_url("api.openai.com", "url").is_err());
        assert!(sanitize_base_url("https://host%2Fv1", "url").is_err());
        assert!(sanitize_base_url("   ", "url").is_err());
    }
}

//! Validation utilities for CLI arguments and configuration values

/// Length of a hex-encoded SHA-256 digest
pub const SHA256_HEX_LEN: usize = 64;

/// Error raised when a configuration or argument value is invalid
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl crate::core::error_handling::ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// True if `value` is a lowercase 64-character hex digest
pub fn is_sha256_hex(value: &str) -> bool {
    value.len() == SHA256_HEX_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

/// Validate a content hash argument, normalising it to lowercase
pub fn validate_sha256(value: &str) -> Result<String, String> {
    let normalised = value.trim().to_ascii_lowercase();
    if is_sha256_hex(&normalised) {
        Ok(normalised)
    } else {
        Err(format!(
            "'{}' is not a SHA-256 hash (expected {} hex characters)",
            value, SHA256_HEX_LEN
        ))
    }
}

/// Validate a remote service base URL
pub fn validate_base_url(value: &str) -> Result<String, ValidationError> {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ValidationError::new(&format!(
            "Invalid base URL '{}'. Only http:// and https:// are supported",
            value
        )));
    }
    Ok(value.trim_end_matches('/').to_string())
}

//! # Errors
//!
//! `ValidationError` is the only error the comment core can produce, and it
//! never escapes as a panic: the composer shows it inline. `FeedError` covers
//! loading post data from disk at startup.

use thiserror::Error;

/// Rejected input at the comment form boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Submit was attempted while the draft was the empty string.
    #[error("This field is required")]
    EmptyDraft,
}

/// Failure to read or parse a feed file.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("feed JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feed TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported feed format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_message_is_user_facing() {
        assert_eq!(ValidationError::EmptyDraft.to_string(), "This field is required");
    }

    #[test]
    fn unsupported_format_names_extension() {
        let err = FeedError::UnsupportedFormat("yaml".to_string());
        assert!(err.to_string().contains("yaml"));
    }
}

use thiserror::Error;

/// Errors raised while building, registering or resolving styles.
#[derive(Error, Debug)]
pub enum StyleError {
    /// Unknown attribute names, unknown style references and kind mismatches.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A style that does not satisfy its kind's rules once inheritance has been applied.
    #[error("Invalid value for '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Stylesheet error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StyleError {
    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        StyleError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

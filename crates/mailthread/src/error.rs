//! Error types for extraction
//!
//! Heuristic misses (no containers, no sender node, no header match) are not
//! errors and never surface here. Only failures of the host view itself do.

/// Fatal failure of one extraction attempt
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Thread view unavailable: {message}")]
    ViewUnavailable { message: String },
}

impl ExtractError {
    pub fn view_unavailable(message: impl Into<String>) -> Self {
        Self::ViewUnavailable {
            message: message.into(),
        }
    }
}

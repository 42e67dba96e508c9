//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Shown when a failure carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred during the analysis.";

#[derive(Error, Debug)]
pub enum DomainError {
    /// The model answered without any text.
    #[error("Report generation failed: the AI returned no content")]
    EmptyResponse,

    /// Text came back but is not a report. Detail is for logs.
    #[error("Could not parse the report data ({0}). Try fewer brands or run the analysis again.")]
    Parse(String),

    #[error("AI service request failed: {0}")]
    Transport(String),

    #[error("AI service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report export failed: {0}")]
    Export(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// Human-readable text for the error panel. Falls back to a generic message.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        let detail = match self {
            DomainError::Transport(d)
            | DomainError::Config(d)
            | DomainError::Export(d)
            | DomainError::Ui(d) => Some(d.as_str()),
            _ => None,
        };
        if detail.is_some_and(|d| d.trim().is_empty()) || message.trim().is_empty() {
            return GENERIC_FAILURE_MESSAGE.to_string();
        }
        message
    }
}

use shieldguard_types::ErrorCode;
use thiserror::Error;

/// SDK-specific errors.
#[derive(Debug, Error)]
pub enum SdkError {
    /// API returned a structured error
    #[error("API error: {code} - {message}")]
    Api { code: ErrorCode, message: String },

    /// API returned a non-success status without a structured error body
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Network error (only with `client` feature)
    #[cfg(feature = "client")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// Whether the caller must sign in again.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            SdkError::Api {
                code: ErrorCode::Unauthenticated,
                ..
            }
        )
    }
}

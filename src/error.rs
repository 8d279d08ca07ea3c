//! Error types for the flow API client and the application layer

use thiserror::Error;

/// Errors raised while talking to the flow server
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure (connection refused, timeout, bad body)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the session; the unauthorized hook already ran
    #[error("Session expired, sign in again at {login_url}")]
    Unauthorized { login_url: String },

    /// Any other non-2xx response
    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

pub use flujos_core::StoreError;

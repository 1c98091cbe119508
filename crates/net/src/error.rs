//! Network error types

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No token in client storage; raised before any request is sent
    #[error("No bearer token available")]
    Unauthenticated,

    #[error("Stored bearer token is not a valid header value")]
    InvalidToken,

    /// Non-2xx response
    #[error("{status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Well-formed JSON of the wrong shape
    #[error("{0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Client storage error: {0}")]
    Storage(#[from] portal_core::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("{0}")]
    Login(String),
}

impl Error {
    pub(crate) fn expected_array() -> Self {
        Error::InvalidResponse("Invalid response format: expected an array".to_string())
    }

    /// True for failures that mean the user has to sign in again
    pub fn needs_login(&self) -> bool {
        matches!(self, Error::Unauthenticated | Error::InvalidToken)
            || matches!(self, Error::Http { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

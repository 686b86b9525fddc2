use reqwest::StatusCode;
use thiserror::Error;

pub const NOT_CONFIGURED: &str = "API key not configured. Run \"yougile init\" first.";

/// Errors returned by [`super::YougileClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable local configuration; recoverable by running `init`.
    #[error("{0}")]
    Configuration(String),
    /// Bad credentials or any failure on the auth endpoints.
    #[error("authentication failed: {message}")]
    Auth {
        status: Option<StatusCode>,
        message: String,
    },
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Http { status: StatusCode, body: String },
    #[error("invalid API host: {0}")]
    InvalidHost(#[from] url::ParseError),
    #[error("failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    pub(crate) fn not_configured() -> Self {
        ClientError::Configuration(NOT_CONFIGURED.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Auth { status, .. } => *status == Some(StatusCode::UNAUTHORIZED),
            ClientError::Http { status, .. } => *status == StatusCode::UNAUTHORIZED,
            _ => false,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

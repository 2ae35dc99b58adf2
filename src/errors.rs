use axum::http::StatusCode;
use std::fmt;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DisplayError> for AppError {
    fn from(err: DisplayError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// A display target could not be written or read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    MissingTarget(&'static str),
    Unavailable(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget(name) => write!(f, "display target '{name}' not found"),
            Self::Unavailable(reason) => write!(f, "display unavailable: {reason}"),
        }
    }
}

impl std::error::Error for DisplayError {}

/// Anything that ends a poll cycle before it finished rendering.
#[derive(Debug)]
pub enum CycleError {
    Network(reqwest::Error),
    Decode(serde_json::Error),
    UnexpectedPayload(String),
    Display(DisplayError),
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(err) => write!(f, "request failed: {err}"),
            Self::Decode(err) => write!(f, "invalid JSON body: {err}"),
            Self::UnexpectedPayload(detail) => write!(f, "unexpected payload: {detail}"),
            Self::Display(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::UnexpectedPayload(_) => None,
            Self::Display(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for CycleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err)
    }
}

impl From<serde_json::Error> for CycleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}

impl From<DisplayError> for CycleError {
    fn from(err: DisplayError) -> Self {
        Self::Display(err)
    }
}

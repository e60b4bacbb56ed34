use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// The store could not be reached or rejected the query.
    #[error("History store unavailable: {0}")]
    StoreUnavailable(#[source] BoxedError),
}

impl From<mongodb::error::Error> for HistoryError {
    fn from(error: mongodb::error::Error) -> Self {
        Self::StoreUnavailable(Box::new(error))
    }
}

pub type HistoryResult<T> = Result<T, HistoryError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Page rendering failed: {0}")]
    Render(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let status = match self {
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, "Something went wrong rendering this page.").into_response()
    }
}

//! Error type returned by the HTTP handlers.
//!
//! Every variant renders as `{"error": "<message>"}`; `NoMatches` also
//! carries branch suggestions when the requested branch is unknown.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please enter a valid JEE rank (greater than 0)")]
    InvalidRank,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to load data")]
    DataUnavailable(String),

    #[error("No colleges found matching your criteria")]
    NoMatches { suggestions: Vec<String> },

    #[error("Failed to build Excel file")]
    Export(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRank | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NoMatches { .. } => StatusCode::NOT_FOUND,
            AppError::DataUnavailable(_) | AppError::Export(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::DataUnavailable(detail) | AppError::Export(detail) = self {
            tracing::debug!(detail = %detail, "detail withheld from response");
        }
        let body = match self {
            AppError::NoMatches { suggestions } if !suggestions.is_empty() => {
                json!({"error": self.to_string(), "suggestions": suggestions})
            }
            _ => json!({"error": self.to_string()}),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

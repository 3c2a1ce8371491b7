//! # Centralized Error Handling
//!
//! This module provides a unified error handling system for the application.
//! Every failure leaves the service as a JSON body of the form
//! `{"detail": "..."}`. Authentication and validation failures carry a
//! specific message; everything else is logged here in full and reported to
//! the client with a fixed, generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use validator::{ValidationError, ValidationErrors};

use crate::services::{jwt::JwtError, store::StoreError};
use crate::utils::constant::INTERNAL_ERROR_DETAIL;

/// Central application error type that encompasses all possible error conditions.
///
/// Store errors are logged automatically when converted into a response,
/// other errors should be logged at the point of creation if needed.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not authenticated")]
    Unauthorized,

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token")]
    InvalidToken,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("store error")]
    Store(#[from] StoreError),

    #[error("internal server error")]
    Internal,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl AppError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::TokenExpired | AppError::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Store(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> &str {
        match self {
            AppError::Unauthorized => "Not authenticated",
            AppError::TokenExpired => "Token has expired",
            AppError::InvalidToken => "Invalid token",
            AppError::Validation(message) => message,
            AppError::Store(_) | AppError::Internal => INTERNAL_ERROR_DETAIL,
        }
    }
}

/// Builds the generic 500 response used for every fault the client must not
/// see the details of.
pub fn internal_error_response() -> Response {
    AppError::Internal.into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store(e) = &self {
            // Full detail stays in the logs only
            error!(?e, "Store error occurred");
        }

        let status = self.status();
        let mut response = (status, Json(ErrorBody { detail: self.detail() })).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}

impl From<JwtError> for AppError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::MissingBearer => AppError::Unauthorized,
            JwtError::TokenExpired => AppError::TokenExpired,
            JwtError::InvalidToken => AppError::InvalidToken,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|field| field.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::Validation(message)
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(
            error
                .message
                .map(|m| m.into_owned())
                .unwrap_or_else(|| "Invalid input".to_string()),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        AppError::Validation("Invalid request body".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected query string");
        AppError::Validation("Invalid query parameters".to_string())
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;

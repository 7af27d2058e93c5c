//! # REST API Errors
//!
//! Internal error enumeration for the trivia API. Each variant collapses at
//! the HTTP boundary into one of a small set of public kinds, each with a
//! fixed status code and message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Not Found (404)
    // ==================
    /// Requested page ends beyond the stored questions
    #[error("Page {page} is out of range for {total} questions")]
    PageOutOfRange { page: i64, total: i64 },

    #[error("Question not found: {0}")]
    QuestionNotFound(i64),

    /// Category has no questions (or does not exist)
    #[error("No questions in category {0}")]
    EmptyCategory(i64),

    /// Every question matching the quiz filter was already shown
    #[error("No eligible quiz question remains")]
    NoEligibleQuestion,

    /// searchTerm was truthy but not a string
    #[error("Search term must be a string")]
    MalformedSearchTerm,

    #[error("No route for {0}")]
    UnknownRoute(String),

    // ==================
    // Bad Request (400)
    // ==================
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Body is not a JSON object or could not be parsed
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid quiz category: {0}")]
    InvalidQuizCategory(String),

    #[error("previous_questions must be a list of question ids")]
    InvalidPreviousQuestions,

    // ==================
    // Unprocessable (422)
    // ==================
    /// Well-formed creation request whose values cannot be stored
    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    // ==================
    // Method Not Allowed (405)
    // ==================
    #[error("Method not allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Storage failure: {0}")]
    Internal(#[source] StoreError),
}

/// Externally visible error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Unprocessable,
    Internal,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed public message for this kind
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::MethodNotAllowed => "method not allowed",
            ErrorKind::Unprocessable => "unprocessable",
            ErrorKind::Internal => "internal server error",
        }
    }
}

impl ApiError {
    /// Public kind this error is reported as
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::PageOutOfRange { .. }
            | ApiError::QuestionNotFound(_)
            | ApiError::EmptyCategory(_)
            | ApiError::NoEligibleQuestion
            | ApiError::MalformedSearchTerm
            | ApiError::UnknownRoute(_) => ErrorKind::NotFound,

            ApiError::MissingField(_)
            | ApiError::InvalidBody(_)
            | ApiError::InvalidQuizCategory(_)
            | ApiError::InvalidPreviousQuestions => ErrorKind::BadRequest,

            ApiError::Unprocessable(_) => ErrorKind::Unprocessable,
            ApiError::MethodNotAllowed => ErrorKind::MethodNotAllowed,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(reason) => ApiError::Unprocessable(reason),
            other => ApiError::Internal(other),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let kind = err.kind();
        Self {
            success: false,
            error: kind.status_code().as_u16(),
            message: kind.message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(source) => tracing::error!(error = %source, "request failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

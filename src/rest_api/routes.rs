//! # REST API Routes
//!
//! Axum routes for the trivia endpoints. Extractor rejections are mapped
//! into [`ApiError`] so every failure leaves with the same JSON envelope.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::handler::TriviaHandler;
use super::request::{parse_page, QuestionsPost, QuizRequest};
use super::response::{
    CategoriesResponse, CategoryQuestionsResponse, DeleteResponse, QuestionPageResponse,
    QuestionResponse,
};

/// Shared state type
type HandlerState = Arc<TriviaHandler>;

/// Build the trivia router (mounted under `/api` by the HTTP server)
pub fn trivia_routes(handler: HandlerState) -> Router {
    Router::new()
        .route("/categories", get(list_categories_handler))
        .route("/categories/:id/questions", get(category_questions_handler))
        .route(
            "/questions",
            get(list_questions_handler).post(create_or_search_handler),
        )
        .route("/questions/:id", delete(delete_question_handler))
        .route("/quizzes", post(next_quiz_question_handler))
        .with_state(handler)
}

/// Fallback for paths no route matches
pub async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::UnknownRoute(uri.path().to_string())
}

/// Replace axum's empty 405 responses with the error envelope, keeping `Allow`
pub async fn method_not_allowed_envelope(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut replaced = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        replaced.headers_mut().insert(header::ALLOW, allow);
    }
    replaced
}

/// Ids that are not integers cannot name a resource
fn path_id(id: Result<Path<i64>, PathRejection>, uri: &Uri) -> ApiResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::UnknownRoute(uri.path().to_string()))
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(body)| body)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

async fn list_categories_handler(
    State(handler): State<HandlerState>,
) -> ApiResult<Json<CategoriesResponse>> {
    Ok(Json(handler.categories().await?))
}

async fn list_questions_handler(
    State(handler): State<HandlerState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<QuestionPageResponse>> {
    let page = parse_page(&query);
    Ok(Json(handler.question_page(page).await?))
}

async fn create_or_search_handler(
    State(handler): State<HandlerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let body = json_body(body)?;

    match QuestionsPost::from_body(&body)? {
        QuestionsPost::Search(term) => Ok(Json(handler.search(&term).await?).into_response()),
        QuestionsPost::Create(new) => {
            let created = handler.create(new).await?;
            Ok((StatusCode::CREATED, Json(created)).into_response())
        }
    }
}

async fn delete_question_handler(
    State(handler): State<HandlerState>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = path_id(id, &uri)?;
    Ok(Json(handler.delete(id).await?))
}

async fn category_questions_handler(
    State(handler): State<HandlerState>,
    uri: Uri,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let id = path_id(id, &uri)?;
    Ok(Json(handler.category_questions(id).await?))
}

async fn next_quiz_question_handler(
    State(handler): State<HandlerState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<QuestionResponse>> {
    let body = json_body(body)?;
    let request = QuizRequest::from_body(&body)?;
    Ok(Json(handler.next_quiz_question(request).await?))
}

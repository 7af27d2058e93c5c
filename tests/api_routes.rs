//! API Route Tests
//!
//! Drives the full router (CORS, fallbacks, error envelopes included) against
//! an in-memory database loaded with the sample data:
//! - 6 categories, 19 questions
//! - category 3 holds exactly 3 questions
//! - "world cup" appears in exactly 2 questions
//! - category 4 holds questions 11, 12, 13 and 14

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use trivia::http_server::{HttpServer, HttpServerConfig};
use trivia::rest_api::{PagePolicy, TriviaHandler};
use trivia::store::Store;

// =============================================================================
// Helper Functions
// =============================================================================

async fn setup_app(policy: PagePolicy) -> (Store, Router) {
    let store = Store::connect_in_memory().await.unwrap();
    store.ensure_schema().await.unwrap();
    store
        .session()
        .await
        .unwrap()
        .seed_sample_data()
        .await
        .unwrap();

    let handler = TriviaHandler::new(store.clone(), policy);
    let router = HttpServer::with_config(HttpServerConfig::default(), handler).router();
    (store, router)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], expected.as_u16());
    assert_eq!(body["message"], message);
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_get_categories() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/api/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0], json!({"id": 1, "type": "Science"}));
}

#[tokio::test]
async fn test_get_questions_by_category() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/api/categories/3/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 3);
    assert_eq!(body["questions"].as_array().unwrap().len(), 3);
    assert_eq!(body["current_category"], 3);
}

#[tokio::test]
async fn test_404_for_category_without_questions() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/api/categories/1000/questions").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    let (status, body) = get(&app, "/api/categories/geography/questions").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_get_questions() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/api/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 19);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["categories"].as_array().unwrap().len(), 6);
    assert_eq!(body["current_category"], "");
    assert_eq!(body["questions"][0]["id"], 1);
}

#[tokio::test]
async fn test_listing_is_repeatable() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let first = get(&app, "/api/questions?page=1").await;
    let second = get(&app, "/api/questions?page=1").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_non_integer_page_means_first_page() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/api/questions?page=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"][0]["id"], 1);
}

#[tokio::test]
async fn test_404_sent_requesting_beyond_valid_questions_page() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/api/questions?page=1000").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    // 2 * 10 > 19: the partial last page is rejected under the strict policy
    let (status, body) = get(&app, "/api/questions?page=2").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test]
async fn test_partial_policy_serves_last_page() {
    let (_store, app) = setup_app(PagePolicy::AllowPartial).await;

    let (status, body) = get(&app, "/api/questions?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 19);
    assert_eq!(body["questions"].as_array().unwrap().len(), 9);
    assert_eq!(body["questions"][0]["id"], 11);

    let (status, _) = get(&app, "/api/questions?page=3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_question() {
    let (store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = delete(&app, "/api/questions/4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let mut session = store.session().await.unwrap();
    assert!(session.find_question(4).await.unwrap().is_none());
    assert_eq!(session.count_questions().await.unwrap(), 18);
}

#[tokio::test]
async fn test_404_sent_if_question_being_deleted_does_not_exist() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = delete(&app, "/api/questions/1000").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");

    let (status, body) = delete(&app, "/api/questions/abc").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

// =============================================================================
// Creation and Search
// =============================================================================

#[tokio::test]
async fn test_create_question() {
    let (store, app) = setup_app(PagePolicy::Strict).await;

    let new_question = json!({
        "question": "How many rings does the Lakers have?",
        "answer": "Five",
        "difficulty": 1,
        "category": "6"
    });
    let (status, body) = post_json(&app, "/api/questions", new_question).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"]["question"], "How many rings does the Lakers have?");
    assert_eq!(body["question"]["category"], 6);

    let id = body["question"]["id"].as_i64().unwrap();
    let mut session = store.session().await.unwrap();
    let stored = session.find_question(id).await.unwrap().unwrap();
    assert_eq!(stored.answer, "Five");
}

#[tokio::test]
async fn test_400_sent_if_posted_question_isnt_formatted_correctly() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(
        &app,
        "/api/questions",
        json!({"answer": "Five", "difficulty": "1", "category": "6"}),
    )
    .await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "bad request");
}

#[tokio::test]
async fn test_create_question_accepts_any_integer_difficulty() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(
        &app,
        "/api/questions",
        json!({"question": "Q", "answer": "A", "category": 1, "difficulty": 6}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["question"]["difficulty"], 6);
}

#[tokio::test]
async fn test_422_sent_if_question_values_cannot_be_stored() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(
        &app,
        "/api/questions",
        json!({"question": "Q", "answer": "A", "category": 1, "difficulty": "hard"}),
    )
    .await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "unprocessable");
}

#[tokio::test]
async fn test_400_sent_for_malformed_json() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/questions")
        .header("content-type", "application/json")
        .body(Body::from("{\"question\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "bad request");
}

#[tokio::test]
async fn test_search_for_question() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(&app, "/api/questions", json!({"searchTerm": "World Cup"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 2);
    assert_eq!(body["questions"].as_array().unwrap().len(), 2);
    assert_eq!(body["current_category"], "");
}

#[tokio::test]
async fn test_search_ignores_non_ascii_case() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, _) = post_json(
        &app,
        "/api/questions",
        json!({"question": "Où se trouve l'ÉCOLE?", "answer": "Ici", "category": 3, "difficulty": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/api/questions", json!({"searchTerm": "école"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["question"], "Où se trouve l'ÉCOLE?");
}

#[tokio::test]
async fn test_search_without_matches() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(&app, "/api/questions", json!({"searchTerm": "zzzz"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 0);
}

#[tokio::test]
async fn test_404_sent_for_non_string_search_term() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(&app, "/api/questions", json!({"searchTerm": 42})).await;

    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

// =============================================================================
// Quizzes
// =============================================================================

#[tokio::test]
async fn test_get_quiz_next_question() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(
        &app,
        "/api/quizzes",
        json!({
            "previous_questions": [],
            "quiz_category": {"type": "ALL", "id": 0}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["question"]["id"].as_i64().is_some());
}

#[tokio::test]
async fn test_quiz_skips_previous_questions() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    for _ in 0..10 {
        let (status, body) = post_json(
            &app,
            "/api/quizzes",
            json!({
                "previous_questions": [11, 12, 13],
                "quiz_category": {"type": "History", "id": "4"}
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"]["id"], 14);
    }
}

#[tokio::test]
async fn test_quiz_accepts_large_previous_questions_list() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let previous: Vec<i64> = (1..=18).chain(1_000..41_000).collect();
    let (status, body) = post_json(
        &app,
        "/api/quizzes",
        json!({
            "previous_questions": previous,
            "quiz_category": {"type": "ALL", "id": 0}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 19);
}

#[tokio::test]
async fn test_404_sent_requesting_quiz_next_question_if_doesnt_exist() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(
        &app,
        "/api/quizzes",
        json!({
            "previous_questions": [11, 12, 13, 14],
            "quiz_category": {"type": "History", "id": 4}
        }),
    )
    .await;

    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test]
async fn test_400_sent_for_incomplete_quiz_request() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = post_json(
        &app,
        "/api/quizzes",
        json!({"quiz_category": {"type": "ALL", "id": 0}}),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "bad request");

    let (status, body) = post_json(
        &app,
        "/api/quizzes",
        json!({"previous_questions": [], "quiz_category": {"id": "sports"}}),
    )
    .await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "bad request");
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_405_sent_for_unsupported_method() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let request = Request::builder()
        .method("PATCH")
        .uri("/api/questions")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "method not allowed");

    let (status, body) = get(&app, "/api/questions/4").await;
    assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
}

#[tokio::test]
async fn test_404_sent_for_unknown_route() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/api/answers").await;

    assert_error(status, &body, StatusCode::NOT_FOUND, "resource not found");
}

#[tokio::test]
async fn test_health() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let (_store, app) = setup_app(PagePolicy::Strict).await;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/questions")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

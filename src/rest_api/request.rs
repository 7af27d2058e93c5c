//! # Request Parsing
//!
//! Turns raw query strings and JSON bodies into typed requests. Validation
//! happens here, once, so handlers only ever see well-formed input.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult};
use crate::store::NewQuestion;

/// Page used when the query string has no usable `page` value
pub const DEFAULT_PAGE: i64 = 1;

/// Fields required to create a question, in the order they are checked
const CREATE_FIELDS: [&str; 4] = ["question", "answer", "category", "difficulty"];

/// Read the 1-based page number from query parameters.
///
/// Missing or non-integer values fall back to [`DEFAULT_PAGE`].
pub fn parse_page(params: &HashMap<String, String>) -> i64 {
    params
        .get("page")
        .and_then(|page| page.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE)
}

/// Body of `POST /api/questions`, which serves both search and creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionsPost {
    /// Case-insensitive substring search
    Search(String),

    /// Insert a new question
    Create(NewQuestion),
}

impl QuestionsPost {
    /// Resolve which operation the body asks for.
    ///
    /// A truthy `searchTerm` always selects search; otherwise all four
    /// creation fields must be present and truthy.
    pub fn from_body(body: &Value) -> ApiResult<Self> {
        let fields = as_object(body)?;

        if let Some(term) = fields.get("searchTerm").filter(|term| is_truthy(term)) {
            return match term {
                Value::String(term) => Ok(QuestionsPost::Search(term.clone())),
                _ => Err(ApiError::MalformedSearchTerm),
            };
        }

        for field in CREATE_FIELDS {
            if !fields.get(field).is_some_and(is_truthy) {
                return Err(ApiError::MissingField(field));
            }
        }

        Ok(QuestionsPost::Create(NewQuestion {
            question: text_field(fields, "question")?,
            answer: text_field(fields, "answer")?,
            category: id_field(fields, "category")?,
            difficulty: id_field(fields, "difficulty")?,
        }))
    }
}

/// Body of `POST /api/quizzes`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    /// Ids already shown in this quiz
    pub previous: Vec<i64>,

    /// Category to draw from (None = all categories)
    pub category: Option<i64>,
}

impl QuizRequest {
    pub fn from_body(body: &Value) -> ApiResult<Self> {
        let fields = as_object(body)?;

        let previous = fields
            .get("previous_questions")
            .filter(|v| !v.is_null())
            .ok_or(ApiError::MissingField("previous_questions"))?;
        let quiz_category = fields
            .get("quiz_category")
            .filter(|v| !v.is_null())
            .ok_or(ApiError::MissingField("quiz_category"))?;

        let previous = previous
            .as_array()
            .ok_or(ApiError::InvalidPreviousQuestions)?
            .iter()
            .map(Value::as_i64)
            .collect::<Option<Vec<_>>>()
            .ok_or(ApiError::InvalidPreviousQuestions)?;

        let id = quiz_category
            .get("id")
            .ok_or_else(|| ApiError::InvalidQuizCategory("missing id".to_string()))?;
        let id = coerce_id(id)
            .ok_or_else(|| ApiError::InvalidQuizCategory(format!("{} is not an integer", id)))?;

        // Category id 0 selects every category
        let category = (id != 0).then_some(id);

        Ok(Self { previous, category })
    }
}

fn as_object(body: &Value) -> ApiResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ApiError::InvalidBody("expected a JSON object".to_string()))
}

/// Truthiness of a JSON value: null, false, 0, "" and empty containers are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Integer id from a JSON integer, an integral float or a numeric string
fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, name: &str) -> ApiResult<String> {
    match fields.get(name) {
        Some(Value::String(text)) => Ok(text.clone()),
        _ => Err(ApiError::Unprocessable(format!("{} must be text", name))),
    }
}

fn id_field(fields: &Map<String, Value>, name: &str) -> ApiResult<i64> {
    fields
        .get(name)
        .and_then(coerce_id)
        .ok_or_else(|| ApiError::Unprocessable(format!("{} must be an integer", name)))
}

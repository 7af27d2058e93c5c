//! # Response Formatting
//!
//! Success envelopes for the trivia API. Every body carries `success: true`.

use serde::Serialize;

use crate::store::{Category, Question};

/// `GET /api/categories`
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

impl CategoriesResponse {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            success: true,
            categories,
        }
    }
}

/// `GET /api/questions`: one page plus the listing context
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: Vec<Category>,
    pub current_category: &'static str,
}

impl QuestionPageResponse {
    pub fn new(questions: Vec<Question>, total_questions: i64, categories: Vec<Category>) -> Self {
        Self {
            success: true,
            questions,
            total_questions,
            categories,
            current_category: "",
        }
    }
}

/// Search results (not paginated)
#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: &'static str,
}

impl QuestionListResponse {
    pub fn new(questions: Vec<Question>) -> Self {
        let total_questions = questions.len() as i64;
        Self {
            success: true,
            questions,
            total_questions,
            current_category: "",
        }
    }
}

/// `GET /api/categories/{id}/questions`
#[derive(Debug, Clone, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: i64,
}

impl CategoryQuestionsResponse {
    pub fn new(questions: Vec<Question>, current_category: i64) -> Self {
        let total_questions = questions.len() as i64;
        Self {
            success: true,
            questions,
            total_questions,
            current_category,
        }
    }
}

/// A single question: the created record or the next quiz question
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub success: bool,
    pub question: Question,
}

impl QuestionResponse {
    pub fn new(question: Question) -> Self {
        Self {
            success: true,
            question,
        }
    }
}

/// Delete response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self { success: true }
    }
}

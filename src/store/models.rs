//! Row models for the `questions` and `categories` tables.

use serde::Serialize;
use sqlx::FromRow;

/// A stored trivia question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    /// Id of the owning category (not enforced as a foreign key)
    pub category: i64,
    pub difficulty: i64,
}

/// A labelled grouping of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// Validated payload for a question insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

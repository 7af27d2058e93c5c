//! # Trivia Handler
//!
//! One method per API operation. Each method opens a single store session,
//! runs its queries, and shapes the result into a response envelope.

use serde::{Deserialize, Serialize};

use crate::store::{NewQuestion, QuestionFilter, Store};

use super::errors::{ApiError, ApiResult};
use super::request::QuizRequest;
use super::response::{
    CategoriesResponse, CategoryQuestionsResponse, DeleteResponse, QuestionListResponse,
    QuestionPageResponse, QuestionResponse,
};

/// Fixed listing page size
pub const QUESTIONS_PER_PAGE: i64 = 10;

/// How the listing treats a page that runs past the last question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagePolicy {
    /// Reject any page whose last slot lies beyond the total, even if it
    /// would hold some questions
    #[default]
    Strict,

    /// Serve a short final page; reject only pages that start past the end
    AllowPartial,
}

impl PagePolicy {
    /// Offset of `page`'s first question, or None if the page is rejected
    pub fn offset(self, page: i64, total: i64) -> Option<i64> {
        if page < 1 {
            return None;
        }
        let offset = (page - 1).checked_mul(QUESTIONS_PER_PAGE)?;
        let end = offset.checked_add(QUESTIONS_PER_PAGE)?;

        let admitted = match self {
            PagePolicy::Strict => end <= total,
            PagePolicy::AllowPartial => page == 1 || offset < total,
        };
        admitted.then_some(offset)
    }
}

/// Request handler for the trivia API
pub struct TriviaHandler {
    store: Store,
    page_policy: PagePolicy,
}

impl TriviaHandler {
    pub fn new(store: Store, page_policy: PagePolicy) -> Self {
        Self { store, page_policy }
    }

    /// All categories
    pub async fn categories(&self) -> ApiResult<CategoriesResponse> {
        let mut session = self.store.session().await?;
        let categories = session.list_categories().await?;
        Ok(CategoriesResponse::new(categories))
    }

    /// One page of the full question listing
    pub async fn question_page(&self, page: i64) -> ApiResult<QuestionPageResponse> {
        let mut session = self.store.session().await?;

        let total = session.count_questions().await?;
        let offset = self
            .page_policy
            .offset(page, total)
            .ok_or(ApiError::PageOutOfRange { page, total })?;

        let questions = session.question_page(offset, QUESTIONS_PER_PAGE).await?;
        let categories = session.list_categories().await?;

        Ok(QuestionPageResponse::new(questions, total, categories))
    }

    /// Case-insensitive substring search over question text
    pub async fn search(&self, term: &str) -> ApiResult<QuestionListResponse> {
        let mut session = self.store.session().await?;
        let questions = session.search_questions(term).await?;

        tracing::debug!(term, matches = questions.len(), "question search");
        Ok(QuestionListResponse::new(questions))
    }

    pub async fn create(&self, new: NewQuestion) -> ApiResult<QuestionResponse> {
        let mut session = self.store.session().await?;
        let question = session.insert_question(&new).await?;

        tracing::info!(id = question.id, category = question.category, "question created");
        Ok(QuestionResponse::new(question))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<DeleteResponse> {
        let mut session = self.store.session().await?;
        if !session.delete_question(id).await? {
            return Err(ApiError::QuestionNotFound(id));
        }

        tracing::info!(id, "question deleted");
        Ok(DeleteResponse::success())
    }

    /// Questions in one category. An empty category is reported as not found.
    pub async fn category_questions(&self, category: i64) -> ApiResult<CategoryQuestionsResponse> {
        let mut session = self.store.session().await?;
        let questions = session.questions_in_category(category).await?;

        if questions.is_empty() {
            return Err(ApiError::EmptyCategory(category));
        }
        Ok(CategoryQuestionsResponse::new(questions, category))
    }

    /// Draw a random question not yet shown in this quiz
    pub async fn next_quiz_question(&self, request: QuizRequest) -> ApiResult<QuestionResponse> {
        let filter = QuestionFilter::in_category(request.category).excluding(request.previous);

        let mut session = self.store.session().await?;
        let question = session
            .random_question(&filter)
            .await?
            .ok_or(ApiError::NoEligibleQuestion)?;

        Ok(QuestionResponse::new(question))
    }
}

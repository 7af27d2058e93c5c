//! # Trivia REST API Module
//!
//! HTTP endpoints for categories, paginated question listing, search,
//! creation, deletion and quiz draws.

pub mod errors;
pub mod handler;
pub mod request;
pub mod response;
pub mod routes;

pub use errors::{ApiError, ApiResult, ErrorKind};
pub use handler::{PagePolicy, TriviaHandler, QUESTIONS_PER_PAGE};
pub use request::{QuestionsPost, QuizRequest};
pub use routes::trivia_routes;

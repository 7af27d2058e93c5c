//! # Trivia Store
//!
//! Query layer over the SQLite database holding categories and questions.
//!
//! A [`Store`] owns the connection pool. Every request works through a
//! [`Session`], which holds exactly one pooled connection and hands it back
//! when dropped, on success and error paths alike.

pub mod errors;
pub mod filter;
pub mod models;
pub mod queries;
pub mod schema;
pub mod seed;

pub use errors::{StoreError, StoreResult};
pub use filter::QuestionFilter;
pub use models::{Category, NewQuestion, Question};
pub use queries::{Session, Store};

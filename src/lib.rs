//! trivia - A small REST backend for a trivia game
//!
//! Serves questions and categories from SQLite, with paginated listing,
//! keyword search, question creation and deletion, and random quiz draws
//! that skip previously shown questions.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod store;

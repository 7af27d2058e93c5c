//! # Trivia HTTP Server Module
//!
//! Combines the trivia API router with health checks, CORS and request
//! tracing into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/*` - Trivia API

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;

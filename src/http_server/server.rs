//! # HTTP Server
//!
//! Main HTTP server combining the trivia API with health checks.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rest_api::routes::{method_not_allowed_envelope, unknown_route};
use crate::rest_api::{trivia_routes, TriviaHandler};

use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// HTTP Server for the trivia API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `handler`
    pub fn with_config(config: HttpServerConfig, handler: TriviaHandler) -> Self {
        let router = Self::build_router(&config, Arc::new(handler));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, handler: Arc<TriviaHandler>) -> Router {
        Router::new()
            .merge(health_routes())
            .nest("/api", trivia_routes(handler))
            .fallback(unknown_route)
            .layer(middleware::map_response(method_not_allowed_envelope))
            .layer(TraceLayer::new_for_http())
            .layer(Self::cors_layer(config))
    }

    fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        if config.cors_origins.is_empty() {
            return cors.allow_origin(Any);
        }

        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();

        cors.allow_origin(AllowOrigin::list(origins))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C is received
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        tracing::info!(addr = %listener.local_addr()?, "trivia API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("trivia API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

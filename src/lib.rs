//! # AI Swagger Helper
//!
//! Example request bodies for API documentation viewers. A "generate body"
//! button next to the request-body editor resolves the operation's JSON
//! schema, posts it to a backend and drops the returned example into the
//! editor.
//!
//! ## Features
//!
//! - **Schema resolution**: `$ref` nodes inlined from the API document with a depth limit
//! - **Editor action**: idle/loading state machine with subscribe/notify
//! - **Backend**: `POST /ai-swagger/generate` producing bodies with an LLM or random data
//! - **LLM fallback**: random, schema-driven values whenever the LLM fails
//! - **Health Checks**: liveness and status endpoints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ai_swagger_helper::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let settings = Settings::new()?;
//!
//!     // Server will start on configured host:port
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: wire types, host ports, schema resolution and lookup
//! - **Plugin**: registration and the per-editor generate action
//! - **Adapters**: HTTP client, generate endpoint, body generators
//! - **Config**: Configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod plugin;

use crate::adapters::body_generator::BodyGenerator;
use crate::adapters::generate_handler::{self, GenerateState};
use crate::adapters::health_handler::HealthHandler;
use crate::config::Settings;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `settings` - Application settings (generate route path and on/off switch)
/// * `generator` - Body generator shared by all requests
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(settings: &Settings, generator: Arc<BodyGenerator>) -> Router {
    let health_handler = Arc::new(HealthHandler::new(generator.clone()));

    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let mut app = health_router;
    if settings.generator.enabled {
        let generate_router = Router::new()
            .route(&settings.generator.endpoint_path, post(generate_handler::generate_body))
            .with_state(GenerateState { generator });
        app = app.merge(generate_router);
    }

    app.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}

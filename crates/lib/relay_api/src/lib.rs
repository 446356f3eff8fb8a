//! # relay_api
//!
//! HTTP API library for the chat relay.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use relay_core::Relay;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{chat, status};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The upstream relay (HTTP client + read-only configuration).
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_ROOT, get(status::root_handler))
        .route(routes::GET_HEALTH, get(status::health_handler))
        .route(routes::POST_CHAT, post(chat::chat_handler))
        .layer(cors)
        .with_state(state)
}

//! Shopfront storefront library.
//!
//! Server-rendered storefront over an external catalog and order API. The
//! binary in `main.rs` only wires configuration, logging and the listener;
//! everything else lives here so it can be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full storefront application with its middleware stack.
///
/// Layers run outermost first: Sentry hub and HTTP context, request tracing,
/// request ID, then the session store.
pub fn app(state: AppState) -> Router {
    let session_layer =
        middleware::create_session_layer(state.config(), state.sessions().clone());

    routes::routes()
        .layer(session_layer)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::ReceiverConfig;
use crate::handlers;
use crate::AppState;

/// Build the receiver's router.
///
/// Body size is bounded before the handler runs; oversized notifications
/// are answered at the transport boundary.
pub fn build_router(state: Arc<AppState>, config: &ReceiverConfig) -> Router {
    Router::new()
        .route("/capabilities", get(handlers::capabilities))
        .route("/relay-notification", post(handlers::relay_notification))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::letter::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Letter API
        .route("/api/v1/letters", post(handlers::handle_create_letter))
        .route("/api/v1/letters/:id", get(handlers::handle_get_letter))
        .route(
            "/api/v1/letters/:id/refine",
            post(handlers::handle_refine_letter),
        )
        .route(
            "/api/v1/letters/:id/history",
            get(handlers::handle_get_history),
        )
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::pipeline::handlers;
use crate::state::AppState;

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/draft",
            post(handlers::handle_draft).fallback(method_not_allowed),
        )
        .with_state(state)
}

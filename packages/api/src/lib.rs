// ABOUTME: HTTP API layer for Tickbox providing REST endpoints and routing
// ABOUTME: Builds the router over DbState and wraps it with CORS, tracing and panic layers

use axum::{
    routing::{get, patch, put},
    Router,
};
use tower_http::trace::TraceLayer;

use tickbox_storage::DbState;

pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod response;
pub mod todos_handlers;

pub use error::{ApiResult, AppError};

/// Creates the todos API router
pub fn create_todos_router() -> Router<DbState> {
    Router::new()
        .route(
            "/api/todos",
            get(todos_handlers::list_todos).post(todos_handlers::create_todo),
        )
        .route(
            "/api/todos/{id}",
            put(todos_handlers::update_todo).delete(todos_handlers::delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(todos_handlers::toggle_todo))
}

/// All routes, bound to the shared database state
pub fn create_router(db: DbState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .merge(create_todos_router())
        .fallback(route_not_found)
        .with_state(db)
}

/// The complete application: routes plus CORS, request tracing and panic recovery
pub fn create_app(db: DbState, cors_origin: &str) -> Result<Router, AppError> {
    let cors = middleware::cors_layer(cors_origin)?;

    Ok(create_router(db)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::create_panic_handler()))
}

async fn route_not_found() -> AppError {
    AppError::not_found()
}

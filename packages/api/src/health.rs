// ABOUTME: Liveness endpoint for load balancers and smoke tests
// ABOUTME: Answers without touching the database

use axum::Json;

use crate::response::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

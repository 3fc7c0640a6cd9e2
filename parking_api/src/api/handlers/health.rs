use crate::api::api_models::{HEALTH_MESSAGE, HealthResponse};
use axum::Json;
use chrono::Utc;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: HEALTH_MESSAGE,
        timestamp: Utc::now(),
    })
}

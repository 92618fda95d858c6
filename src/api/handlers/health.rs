/*
 * Responsibility
 * - GET / (liveness, no auth)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub const STATUS_MESSAGE: &str = "Notes API is running";

pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "message": STATUS_MESSAGE })))
}

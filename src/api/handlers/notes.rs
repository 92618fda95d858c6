/*
 * Responsibility
 * - /api/notes handlers
 * - Identity comes from AuthCtx only; the owner is never taken from the request body
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    api::{dto::notes::CreateNoteRequest, extractors::AuthCtxExtractor},
    error::AppError,
    repos::Note,
    state::AppState,
};

pub async fn list_notes(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, AppError> {
    let notes = state.notes.list_notes(&ctx.user_id).await?;

    Ok(Json(notes))
}

pub async fn create_note(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(req) = payload?;
    req.validate().map_err(AppError::validation)?;

    let created = state.notes.create_note(&ctx.user_id, &req.content).await?;

    // The store may acknowledge the insert without handing the row back.
    Ok(match created {
        Some(note) => (StatusCode::CREATED, Json(note)).into_response(),
        None => (StatusCode::OK, Json(json!({}))).into_response(),
    })
}

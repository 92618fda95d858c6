/*
 * Responsibility
 * - URL layout under /api
 * - Every route here requires a bearer token (route_layer)
 */
use axum::{Router, routing::get};

use crate::api::handlers::notes::{create_note, list_notes};
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let notes = Router::new().route("/notes", get(list_notes).post(create_note));

    middleware::auth::access::apply(notes, state)
}

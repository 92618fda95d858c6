/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Built once at startup, cheap to Clone (Arc inside)
 */
use std::sync::Arc;

use crate::services::{auth::TokenVerifier, notes::NoteService};

#[derive(Clone, Debug)]
pub struct AppState {
    // None when no issuer is configured; every protected request is then rejected.
    pub auth: Option<Arc<TokenVerifier>>,
    pub notes: NoteService,
}

impl AppState {
    pub fn new(auth: Option<Arc<TokenVerifier>>, notes: NoteService) -> Self {
        Self { auth, notes }
    }
}

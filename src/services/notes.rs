//! Note gateway: per-user list/create on top of a [`NoteStore`].
//!
//! The gateway owns the welcome-note bootstrap: a user with no notes gets one
//! fixed note inserted on their first list. The read, insert and re-read are
//! separate store calls, so two first requests racing for the same new user can
//! both insert a welcome note. Nothing here deduplicates them.

use std::sync::Arc;

use thiserror::Error;

use crate::identity::UserId;
use crate::repos::{NewNote, Note, NoteStore, RepoError};

pub const WELCOME_NOTE_CONTENT: &str = "歡迎來到 TrustCase！您的第一個私密筆記已在此啟動。🚀";

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note store not configured")]
    Unavailable,
    #[error(transparent)]
    Store(#[from] RepoError),
}

#[derive(Clone)]
pub struct NoteService {
    // None when the store client could not be built at startup.
    store: Option<Arc<dyn NoteStore>>,
}

impl std::fmt::Debug for NoteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteService")
            .field("backend", &self.store.as_ref().map(|s| s.backend_name()))
            .finish()
    }
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn unavailable() -> Self {
        Self { store: None }
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&dyn NoteStore, NoteError> {
        self.store.as_deref().ok_or(NoteError::Unavailable)
    }

    /// All notes owned by `user`, inserting the welcome note first if there are none.
    pub async fn list_notes(&self, user: &UserId) -> Result<Vec<Note>, NoteError> {
        let store = self.store()?;

        let notes = store.select_by_owner(user).await?;
        if !notes.is_empty() {
            return Ok(notes);
        }

        tracing::info!(user = %user, "first visit, inserting welcome note");
        store.insert(&NewNote::new(user, WELCOME_NOTE_CONTENT)).await?;

        Ok(store.select_by_owner(user).await?)
    }

    /// Insert a note for `user`. `None` when the store reported no inserted row.
    pub async fn create_note(
        &self,
        user: &UserId,
        content: &str,
    ) -> Result<Option<Note>, NoteError> {
        let store = self.store()?;

        Ok(store.insert(&NewNote::new(user, content)).await?)
    }
}

//! Note rows and the store interface the gateway talks to.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::UserId;
use crate::repos::error::RepoResult;

/// Column holding the owning identity.
pub const OWNER_COLUMN: &str = "clerk_user_id";

/// A persisted note.
///
/// Fields assigned by the store (`id`, `created_at`, ...) are opaque here and are
/// carried through untouched in `extra`. The table's shape is not enforced: a
/// row with a null or missing owner/content still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub clerk_user_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Insert payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub clerk_user_id: String,
    pub content: String,
}

impl NewNote {
    pub fn new(owner: &UserId, content: impl Into<String>) -> Self {
        Self {
            clerk_user_id: owner.as_str().to_string(),
            content: content.into(),
        }
    }
}

/// Store interface for the notes table.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait NoteStore: Send + Sync + 'static {
    // Backend name, for logging.
    fn backend_name(&self) -> &'static str;

    // Every row whose owner column equals `owner`.
    async fn select_by_owner(&self, owner: &UserId) -> RepoResult<Vec<Note>>;

    // Insert one row.
    //
    // Returns:
    // - `Ok(Some(row))` with the row as stored
    // - `Ok(None)` if the store reported no inserted row
    async fn insert(&self, note: &NewNote) -> RepoResult<Option<Note>>;
}

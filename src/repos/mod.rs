/*
 * Responsibility
 * - Access to the external notes table
 * - `NoteStore` is the seam; `RestNoteStore` is the production backend
 */
pub mod error;
pub mod note_repo;
pub mod note_store;

pub use error::{RepoError, RepoResult};
pub use note_repo::RestNoteStore;
pub use note_store::{NewNote, Note, NoteStore};

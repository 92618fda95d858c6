/*
 * Responsibility
 * - Notes request DTO
 * - Responses are the stored rows as-is (see repos::Note)
 */
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub content: String,
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.content.is_empty() {
            return Err("content is required");
        }

        Ok(())
    }
}

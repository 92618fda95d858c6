/*
 * Responsibility
 * - What the repo layer reports upward
 */
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store request failed: {0}")]
    Store(#[from] reqwest::Error),
    #[error("invalid store url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("store key is not a valid header value")]
    InvalidKey,
}

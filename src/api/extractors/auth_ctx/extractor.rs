use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthCtx;

/// Extractor for handlers that need the caller's identity.
/// Relies on the access middleware having inserted AuthCtx into the extensions;
/// 401 when it is missing (route not behind the middleware).
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(AppError::Unauthorized)
    }
}

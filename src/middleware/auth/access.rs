//! Bearer access-token verification → `AuthCtx` in request extensions.
//!
//! Every failure is a 401 with the same generic body. The reason is only logged.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Put the given routes behind bearer authentication.
///
/// `route_layer` so that unmatched paths still 404 instead of 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        tracing::warn!("missing or malformed bearer authorization header");
        AppError::Unauthorized
    })?;

    let Some(verifier) = state.auth.as_deref() else {
        tracing::warn!("token verifier not configured, rejecting request");
        return Err(AppError::Unauthorized);
    };

    let verified = match verifier.verify(&token).await {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = %err, "access token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    req.extensions_mut().insert(AuthCtx::new(verified.user_id));

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;

    // Scheme is case-insensitive
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

//! CORS policy for browser clients.
//!
//! Policy:
//! - Default: fully permissive (any origin, method and header), WITHOUT credentials.
//!   Production deployments should set an allowlist.
//! - `CORS_ALLOWED_ORIGINS` set: only those exact origins are allowed.

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

/// Apply CORS policy to the given Router.
///
/// Do not combine wildcard origin (`Any`) with `allow_credentials(true)`.
pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(&config.cors_allowed_origins))
}

fn layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let allowed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _req| allowed.iter().any(|v| v == origin),
        ))
    };

    cors.allow_methods(Any).allow_headers(Any)
}

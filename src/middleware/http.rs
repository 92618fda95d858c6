//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits
//!
//! No global timeout: upstream calls fail or succeed on the transport's own terms.

use axum::Router;
use axum::http::header::HeaderName;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Body limit: 1 MiB
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Apply HTTP-level middleware to the given Router.
pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the authenticated request context (AuthCtx) to handlers
 * - axum glue lives in extractor, the type itself in types
 */

mod extractor;
mod types;

pub use extractor::AuthCtxExtractor;
pub use types::AuthCtx;

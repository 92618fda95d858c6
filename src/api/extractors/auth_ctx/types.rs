/*
 * Responsibility
 * - The authenticated context visible to handlers
 * - The middleware verifies the token and stores this in request extensions
 */

use crate::identity::UserId;

/// Context attached to an authenticated request.
///
/// - `user_id` is the token's `sub`, verbatim
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: UserId,
}

impl AuthCtx {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

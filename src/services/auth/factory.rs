//! Factory: build the `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::services::auth::{AudiencePolicy, JwksClient, TokenVerifier};

pub fn build_token_verifier(config: &AuthConfig) -> Arc<TokenVerifier> {
    let keys = Arc::new(JwksClient::new(config.jwks_url.clone()));

    let audience = match (&config.audience, config.verify_audience) {
        (Some(aud), true) => AudiencePolicy::Require(aud.clone()),
        _ => AudiencePolicy::Ignore,
    };

    if audience == AudiencePolicy::Ignore {
        tracing::warn!(
            issuer = %config.issuer,
            "audience verification disabled, accepting tokens for any client"
        );
    }

    Arc::new(TokenVerifier::new(
        keys,
        &config.issuer,
        audience,
        config.leeway_seconds,
    ))
}

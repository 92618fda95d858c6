use jsonwebtoken::{Algorithm, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt, sync::Arc};

use crate::identity::UserId;
use crate::services::auth::jwks::{JwksClient, KeyError};

// Errors returned by access-token verification.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    Key(KeyError),
    MissingKid,
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::Key(e) => write!(f, "signing key unavailable: {}", e),
            Self::MissingKid => write!(f, "token header has no 'kid'"),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            Self::Key(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

impl From<KeyError> for AccessJwtError {
    fn from(e: KeyError) -> Self {
        Self::Key(e)
    }
}

/// Claims we read from the access token. Everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub sub: String,
    pub exp: u64,
}

/// Verified result handed to the rest of the app.
#[derive(Debug, Clone)]
pub struct VerifiedAccessToken {
    pub user_id: UserId,
}

/// Audience handling for incoming tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudiencePolicy {
    /// `aud` is not looked at. Tokens minted for any client are accepted.
    Ignore,
    /// `aud` must contain this value.
    Require(String),
}

/// RS256 access-token verifier backed by the issuer's JWKS.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<JwksClient>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("keys", &self.keys)
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(
        keys: Arc<JwksClient>,
        issuer: &str,
        audience: AudiencePolicy,
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        match audience {
            AudiencePolicy::Ignore => validation.validate_aud = false,
            AudiencePolicy::Require(aud) => validation.set_audience(&[aud]),
        }

        Self { keys, validation }
    }

    pub fn verifies_audience(&self) -> bool {
        self.validation.validate_aud
    }

    /// Verify signature, `exp`, `nbf`, `iss` (and `aud` when required) and
    /// return the subject, unmodified, as the caller's identity.
    pub async fn verify(&self, token: &str) -> Result<VerifiedAccessToken, AccessJwtError> {
        let header = jsonwebtoken::decode_header(token)?;
        let kid = header.kid.ok_or(AccessJwtError::MissingKid)?;

        let key = self.keys.resolve(&kid).await?;
        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &self.validation)?;

        Ok(VerifiedAccessToken {
            user_id: UserId::new(data.claims.sub),
        })
    }
}

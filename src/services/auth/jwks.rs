//! Issuer signing keys, fetched from the JWKS endpoint and cached by `kid`.
//!
//! The cache has no TTL. A token naming a `kid` we have not seen triggers a
//! refetch, which is how key rotation on the provider side is picked up.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("no signing key with kid {0:?} in the issuer's key set")]
    NotFound(String),
    #[error("failed to fetch signing keys: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Read-through cache over the issuer's JWKS document.
pub struct JwksClient {
    http: reqwest::Client,
    jwks_url: String,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl std::fmt::Debug for JwksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material is not printed
        f.debug_struct("JwksClient")
            .field("jwks_url", &self.jwks_url)
            .field("cached_keys", &self.cached_len())
            .finish()
    }
}

impl JwksClient {
    pub fn new(jwks_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), jwks_url)
    }

    pub fn with_client(http: reqwest::Client, jwks_url: impl Into<String>) -> Self {
        Self {
            http,
            jwks_url: jwks_url.into(),
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Key for `kid`, fetching the key set on a cache miss.
    pub async fn resolve(&self, kid: &str) -> Result<DecodingKey, KeyError> {
        if let Some(key) = self.cached(kid) {
            return Ok(key);
        }

        debug!(kid, url = %self.jwks_url, "signing key not cached, fetching key set");
        self.refresh().await?;

        self.cached(kid).ok_or_else(|| KeyError::NotFound(kid.to_string()))
    }

    fn cached(&self, kid: &str) -> Option<DecodingKey> {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kid)
            .cloned()
    }

    fn cached_len(&self) -> usize {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    async fn refresh(&self) -> Result<(), KeyError> {
        let set = self
            .http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;

        let fresh = decoding_keys(&set);

        // Replaced wholesale; the lock is never held across an await.
        *self.keys.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        Ok(())
    }
}

fn decoding_keys(set: &JwkSet) -> HashMap<String, DecodingKey> {
    let mut keys = HashMap::with_capacity(set.keys.len());

    for jwk in &set.keys {
        let Some(kid) = jwk.common.key_id.as_deref() else {
            warn!("skipping signing key without kid");
            continue;
        };
        match DecodingKey::from_jwk(jwk) {
            Ok(key) => {
                keys.insert(kid.to_string(), key);
            }
            Err(e) => warn!(kid, error = %e, "skipping unusable signing key"),
        }
    }

    keys
}

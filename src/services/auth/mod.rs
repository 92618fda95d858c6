pub mod access_jwt;
pub mod factory;
pub mod jwks;

pub use access_jwt::{AccessJwtError, AudiencePolicy, TokenVerifier, VerifiedAccessToken};
pub use factory::build_token_verifier;
pub use jwks::{JwksClient, KeyError};

/*
 * Responsibility
 * - Load settings from the environment (.env is honoured via dotenvy)
 * - Missing issuer / store settings degrade the service instead of failing startup
 * - Unparseable values fail startup
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_NOTES_TABLE: &str = "user_notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Issuer base URL. `iss` must match it exactly.
    pub issuer: String,
    pub jwks_url: String,
    /// Off by default: tokens are accepted whatever audience they were minted for.
    pub verify_audience: bool,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

/// Connection settings for the REST table that holds the notes.
#[derive(Clone)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
    pub table: String,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the access key
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("table", &self.table)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: Option<AuthConfig>,
    pub store: Option<StoreConfig>,

    // Names of the variables that were absent, reported once at startup.
    pub missing: Vec<&'static str>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match non_empty_var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            parse_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let mut missing = Vec::new();

        let issuer = non_empty_var("AUTH_ISSUER");
        if issuer.is_none() {
            missing.push("AUTH_ISSUER");
        }

        let verify_audience = match non_empty_var("AUTH_VERIFY_AUDIENCE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("AUTH_VERIFY_AUDIENCE"))?,
            None => false,
        };

        let audience = non_empty_var("AUTH_AUDIENCE");
        if verify_audience && audience.is_none() {
            return Err(ConfigError::Missing("AUTH_AUDIENCE"));
        }

        let leeway_seconds = match non_empty_var("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let auth = issuer.map(|issuer| AuthConfig {
            jwks_url: non_empty_var("AUTH_JWKS_URL").unwrap_or_else(|| jwks_url_for(&issuer)),
            issuer,
            verify_audience,
            audience,
            leeway_seconds,
        });

        let store_url = non_empty_var("NOTES_STORE_URL");
        if store_url.is_none() {
            missing.push("NOTES_STORE_URL");
        }
        let store_key = non_empty_var("NOTES_STORE_KEY");
        if store_key.is_none() {
            missing.push("NOTES_STORE_KEY");
        }

        let table = non_empty_var("NOTES_TABLE").unwrap_or_else(|| DEFAULT_NOTES_TABLE.to_string());

        let store = match (store_url, store_key) {
            (Some(url), Some(key)) => Some(StoreConfig { url, key, table }),
            _ => None,
        };

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            auth,
            store,
            missing,
        })
    }
}

/// `<issuer>/.well-known/jwks.json`, tolerating a trailing slash on the issuer.
pub fn jwks_url_for(issuer: &str) -> String {
    format!("{}/.well-known/jwks.json", issuer.trim_end_matches('/'))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

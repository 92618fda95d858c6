/*
 * Responsibility
 * - notes table access over the store's REST interface (PostgREST dialect)
 * - select by owner / insert returning the stored row
 * - The owner filter is always applied server-side; no rows are cached here
 */
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

use crate::config::StoreConfig;
use crate::identity::UserId;
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::note_store::{NewNote, Note, NoteStore, OWNER_COLUMN};

/// REST-backed note store.
///
/// Cheap to clone; the inner `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct RestNoteStore {
    http: reqwest::Client,
    table_url: Url,
    key: String,
}

impl std::fmt::Debug for RestNoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the access key
        f.debug_struct("RestNoteStore")
            .field("table_url", &self.table_url.as_str())
            .finish()
    }
}

impl RestNoteStore {
    pub fn new(config: &StoreConfig) -> RepoResult<Self> {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &StoreConfig) -> RepoResult<Self> {
        let table_url = table_url(&config.url, &config.table)?;

        Ok(Self {
            http,
            table_url,
            key: config.key.clone(),
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn auth_headers(&self) -> RepoResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&self.key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", self.key))?);
        Ok(headers)
    }
}

#[async_trait]
impl NoteStore for RestNoteStore {
    fn backend_name(&self) -> &'static str {
        "rest"
    }

    async fn select_by_owner(&self, owner: &UserId) -> RepoResult<Vec<Note>> {
        let filter = format!("eq.{}", owner);

        let rows = self
            .http
            .get(self.table_url.clone())
            .headers(self.auth_headers()?)
            .query(&[("select", "*"), (OWNER_COLUMN, filter.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Note>>()
            .await?;

        Ok(rows)
    }

    async fn insert(&self, note: &NewNote) -> RepoResult<Option<Note>> {
        // The store answers with an array of inserted rows when asked for a representation.
        let rows = self
            .http
            .post(self.table_url.clone())
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .json(note)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Note>>()
            .await?;

        Ok(rows.into_iter().next())
    }
}

fn table_url(base: &str, table: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}/rest/v1/{}", base.trim_end_matches('/'), table))
}

fn header_value(raw: &str) -> RepoResult<HeaderValue> {
    HeaderValue::from_str(raw).map_err(|_| RepoError::InvalidKey)
}

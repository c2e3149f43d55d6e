//! Catalog API client over reqwest
//!
//! The client never retries: retries, if any, are the caller's
//! responsibility, and the coordinators deliberately surface the error and
//! wait for the next user-triggered fetch instead.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use rickmorty_core::{ApiPage, Character, CharacterId, Episode, EpisodeId, Error, Result};

use crate::response::decode_body;

/// Public catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The remote catalog contract consumed by the coordinators.
///
/// Both the id and URL forms of episode lookup are required: list payloads
/// embed absolute episode URLs, while direct episode navigation uses bare ids.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of characters matching an optional name filter.
    ///
    /// `page` absent means the first page. An empty `search` is unfiltered.
    /// The second tuple element is true iff the server reports a next-page
    /// link.
    async fn fetch_characters(
        &self,
        page: Option<u32>,
        search: &str,
    ) -> Result<(Vec<Character>, bool)>;

    /// Fetch a single character by id.
    async fn fetch_character(&self, id: CharacterId) -> Result<Character>;

    /// Fetch a single episode by id.
    async fn fetch_episode(&self, id: EpisodeId) -> Result<Episode>;

    /// Fetch a single episode from an absolute URL embedded in a payload.
    async fn fetch_episode_url(&self, url: &Url) -> Result<Episode>;
}

/// HTTP implementation of [`CatalogApi`].
#[derive(Debug)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client against the public endpoint with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client against an arbitrary base endpoint.
    ///
    /// The base URL must end with a trailing slash for path joins to resolve
    /// relative to it.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("invalid base URL {base_url:?}: {e}")))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, base_url })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "catalog request");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        // Non-2xx bodies still go through the envelope fallback in
        // decode_body, so no error_for_status here.
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;
        decode_body(&body)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn fetch_characters(
        &self,
        page: Option<u32>,
        search: &str,
    ) -> Result<(Vec<Character>, bool)> {
        let url = characters_url(&self.base_url, page, search)?;
        let page: ApiPage<Character> = self.get_json(url).await?;
        let more_available = page.info.more_available();
        Ok((page.results, more_available))
    }

    async fn fetch_character(&self, id: CharacterId) -> Result<Character> {
        let url = entity_url(&self.base_url, "character", id)?;
        self.get_json(url).await
    }

    async fn fetch_episode(&self, id: EpisodeId) -> Result<Episode> {
        let url = entity_url(&self.base_url, "episode", id)?;
        self.get_json(url).await
    }

    async fn fetch_episode_url(&self, url: &Url) -> Result<Episode> {
        self.get_json(url.clone()).await
    }
}

/// Build the paged character listing URL.
///
/// `name` is appended only when the search text is non-empty; the server
/// treats `name=` differently from no filter at all.
fn characters_url(base: &Url, page: Option<u32>, search: &str) -> Result<Url> {
    let mut url = base
        .join("character")
        .map_err(|e| Error::config(format!("bad catalog base URL: {e}")))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("page", &page.unwrap_or(1).to_string());
        if !search.is_empty() {
            query.append_pair("name", search);
        }
    }
    Ok(url)
}

fn entity_url(base: &Url, kind: &str, id: i64) -> Result<Url> {
    base.join(&format!("{kind}/{id}"))
        .map_err(|e| Error::config(format!("bad catalog base URL: {e}")))
}

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::query::restrict_query;
use super::{NO_TITLE, NO_URL, SearchResponse, SearchResult, WebSearch};
use crate::config::{ApiKey, Config};

/// Prefix of every error message carried in [`SearchResponse::Error`].
pub const SEARCH_ERROR_PREFIX: &str = "Error fetching search results";
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyHit>,
}

#[derive(Debug, Deserialize)]
struct TavilyHit {
    title: Option<String>,
    url: Option<String>,
}

#[derive(Clone)]
pub struct TavilyClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl TavilyClient {
    pub fn new(http: Client, api_key: ApiKey, base_url: &str) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(http: Client, config: &Config) -> Self {
        Self::new(http, config.tavily_api_key.clone(), &config.tavily_base_url)
    }

    async fn fetch_results(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&TavilyRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body: TavilyResponse = response.json().await?;
        debug!(hits = body.results.len(), "tavily search complete");
        Ok(normalize_hits(body.results))
    }
}

impl WebSearch for TavilyClient {
    async fn search(&self, query: &str) -> SearchResponse {
        let restricted = restrict_query(query);
        match self.fetch_results(&restricted).await {
            Ok(results) => SearchResponse::Results {
                results,
                query: restricted,
            },
            Err(e) => {
                warn!(error = %e, "search failed");
                SearchResponse::Error {
                    error: format!("{SEARCH_ERROR_PREFIX}: {e}"),
                }
            }
        }
    }
}

fn normalize_hits(hits: Vec<TavilyHit>) -> Vec<SearchResult> {
    if hits.is_empty() {
        return vec![SearchResult::placeholder()];
    }
    hits.into_iter()
        .map(|hit| SearchResult {
            title: hit.title.unwrap_or_else(|| NO_TITLE.to_string()),
            url: hit.url.unwrap_or_else(|| NO_URL.to_string()),
        })
        .collect()
}

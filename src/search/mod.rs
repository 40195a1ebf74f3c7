//! Domain-restricted web search: query restriction, result types, and the Tavily client.

pub(crate) mod query;
pub(crate) mod tavily;

use serde::{Deserialize, Serialize};

pub use tavily::TavilyClient;

pub const NO_TITLE: &str = "No title";
pub const NO_URL: &str = "No URL";
/// Title of the single placeholder returned when a search yields no hits.
pub const NO_RESULTS_TITLE: &str = "Inga resultat";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

impl SearchResult {
    pub fn placeholder() -> Self {
        Self {
            title: NO_RESULTS_TITLE.to_string(),
            url: String::new(),
        }
    }
}

/// Outcome of one search. Serialized as-is into the completion prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Results {
        results: Vec<SearchResult>,
        query: String,
    },
    Error {
        error: String,
    },
}

impl SearchResponse {
    pub fn results(&self) -> &[SearchResult] {
        match self {
            SearchResponse::Results { results, .. } => results,
            SearchResponse::Error { .. } => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchResponse::Error { .. })
    }

    /// JSON rendering embedded verbatim in the prompt.
    pub fn to_payload(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{\"error\": \"unserializable search response: {e}\"}}"))
    }
}

/// Web search that never fails outright; failures come back as [`SearchResponse::Error`].
/// Implemented by `TavilyClient` for production; mock implementations used in tests.
pub trait WebSearch {
    async fn search(&self, query: &str) -> SearchResponse;
}

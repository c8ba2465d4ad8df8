use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default search provider endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://api.tavily.com";

/// Client for the search provider API.
pub struct SearchClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u8,
}

/// One snippet returned by the provider. Fields the provider may omit
/// default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// Provider response: a list of snippets, possibly empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchSnippet>,
}

impl SearchResponse {
    /// Concatenate the `content` of every snippet (skipping blank ones)
    /// into one text blob, one snippet per line.
    #[must_use]
    pub fn joined_content(&self) -> String {
        self.results
            .iter()
            .map(|r| r.content.as_str())
            .filter(|c| !c.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The raw results serialized as JSON, for verbatim embedding in a prompt.
    #[must_use]
    pub fn raw_context(&self) -> String {
        serde_json::to_string(&self.results).unwrap_or_default()
    }
}

impl SearchClient {
    /// Creates a new search client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, SearchError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| SearchError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url })
    }

    /// Run a search and return the provider's snippets.
    ///
    /// # Errors
    /// Returns an error if the query is blank, the request fails, the
    /// provider returns a non-success status, or the body cannot be parsed.
    pub async fn search(
        &self,
        query: &str,
        max_results: u8,
    ) -> Result<SearchResponse, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query must be non-empty".to_owned()));
        }

        let request = SearchRequest { api_key: &self.api_key, query, max_results };
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "could not read error body".to_owned());
            return Err(SearchError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::JsonParse {
                context: "search response".to_owned(),
                source: e,
            })?;
        tracing::debug!(query, results = parsed.results.len(), "search completed");
        Ok(parsed)
    }
}

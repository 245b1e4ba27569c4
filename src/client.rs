use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::config::Config;
use crate::error::{SearchError, SearchResult};
use crate::models::{SearchFilters, SearchResultPage, UserProfile};
use crate::query::{build_query_with, Escaping, SearchQuery};

const USER_AGENT: &str = "rust-github-user-search";
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Page size GitHub uses when the request does not name one.
pub const TEXT_SEARCH_PER_PAGE: u32 = 30;

/// The only sort key the advanced search uses.
pub const SORT_BY_FOLLOWERS: &str = "followers";

/// Remote user directory consumed by search sessions and detail cards.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetches one page of users matching `filters`, sorted by followers.
    async fn search_users(
        &self,
        filters: &SearchFilters,
        page: u32,
        per_page: u32,
    ) -> SearchResult<SearchResultPage>;

    /// Fetches the full profile of `login`.
    async fn fetch_user(&self, login: &str) -> SearchResult<UserProfile>;
}

/// Creates a preconfigured HTTP client with required headers.
pub fn build_client() -> SearchResult<Client> {
    use reqwest::header::{HeaderMap, HeaderValue};

    let mut headers = HeaderMap::new();
    headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));
    headers.insert("Accept", HeaderValue::from_static(ACCEPT));

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| SearchError::Transport(format!("Failed to build HTTP client: {e}")))
}

/// GitHub REST API client for user search and profile lookups.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    http: Client,
    api_url: Url,
    escaping: Escaping,
}

impl GitHubClient {
    pub fn new(http: Client, api_url: Url, escaping: Escaping) -> Self {
        Self {
            http,
            api_url,
            escaping,
        }
    }

    pub fn from_config(config: &Config) -> SearchResult<Self> {
        Ok(Self::new(build_client()?, config.api_url.clone(), config.escaping))
    }

    pub fn query_for(&self, filters: &SearchFilters) -> SearchQuery {
        build_query_with(filters, &self.escaping)
    }

    /// URL of one advanced-search page.
    pub fn search_url(&self, query: &SearchQuery, page: u32, per_page: u32) -> String {
        format!(
            "{}/search/users?q={}&page={page}&per_page={per_page}&sort={SORT_BY_FOLLOWERS}",
            self.base(),
            encode_query(query.as_str()),
        )
    }

    pub fn user_url(&self, login: &str) -> String {
        format!("{}/users/{}", self.base(), encode_component(login))
    }

    /// Plain text search: first page, default page size, best-match order.
    pub async fn search_text(&self, text: &str) -> SearchResult<SearchResultPage> {
        let url = format!(
            "{}/search/users?q={}&per_page={TEXT_SEARCH_PER_PAGE}",
            self.base(),
            encode_component(text.trim()),
        );
        self.get_json(&url).await
    }

    fn base(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    async fn get_json<T>(&self, url: &str) -> SearchResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Transport(format!(
                "GitHub API error ({status}): {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SearchError::Transport(format!("Failed to deserialize response: {e}")))
    }
}

#[async_trait]
impl UserDirectory for GitHubClient {
    async fn search_users(
        &self,
        filters: &SearchFilters,
        page: u32,
        per_page: u32,
    ) -> SearchResult<SearchResultPage> {
        let query = self.query_for(filters);
        let url = self.search_url(&query, page, per_page);
        let result = self.get_json::<SearchResultPage>(&url).await;

        if let Ok(found) = &result {
            tracing::info!(
                %query,
                page,
                items = found.items.len(),
                total = found.total_count,
                "search page received"
            );
        }
        result
    }

    async fn fetch_user(&self, login: &str) -> SearchResult<UserProfile> {
        let url = self.user_url(login);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("Failed to send request: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SearchError::NotFound(login.to_string())),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(SearchError::Transport(format!(
                    "GitHub API error ({status}): {body}"
                )))
            }
            _ => response.json::<UserProfile>().await.map_err(|e| {
                SearchError::Transport(format!("Failed to deserialize GitHub user response: {e}"))
            }),
        }
    }
}

/// Percent-encodes a built query, keeping `+` term separators literal.
fn encode_query(query: &str) -> String {
    query
        .split('+')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("+")
}

/// Percent-encoding for a single URL component; spaces become `+`.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b' ' => out.push('+'),
            b if b.is_ascii_alphanumeric() || b"-._~".contains(&b) => out.push(b as char),
            b => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

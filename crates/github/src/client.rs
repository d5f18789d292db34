//! HTTP plumbing shared by the classic and ProjectV2 adapters.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, instrument};

use filing::BoardApiError;

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const API_VERSION: &str = "2022-11-28";

/// Connection settings for [`GitHubClient`].
#[derive(Clone)]
pub struct GitHubClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Full URL of the GraphQL endpoint.
    pub graphql_url: String,
    /// Installation or personal access token.
    pub token: String,
    /// Value of the `User-Agent` header GitHub requires on every request.
    pub user_agent: String,
}

impl GitHubClientConfig {
    /// Settings for github.com with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            token: token.into(),
            user_agent: concat!("board-filer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for GitHubClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClientConfig")
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// GitHub API client implementing both board ports.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    graphql_url: String,
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GitHubClient {
    /// Builds a client with authentication and GitHub's required headers.
    pub fn new(config: GitHubClientConfig) -> Result<Self, BoardApiError> {
        let header_error = |what: &str| BoardApiError::Transport {
            endpoint: config.api_url.clone(),
            message: format!("invalid {what} header value"),
        };

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| header_error("authorization"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|_| header_error("user-agent"))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BoardApiError::Transport {
                endpoint: config.api_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            graphql_url: config.graphql_url,
        })
    }

    /// Issues a REST `GET` for `path` (relative to the API base URL).
    #[instrument(skip(self))]
    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, BoardApiError> {
        let request = self.http.get(format!("{}{path}", self.api_url));
        self.send(path, request).await
    }

    /// Issues a REST `POST` of `body` to `path` (relative to the API base URL).
    #[instrument(skip(self, body))]
    pub(crate) async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, BoardApiError> {
        let request = self.http.post(format!("{}{path}", self.api_url)).json(body);
        self.send(path, request).await
    }

    /// Executes a GraphQL query or mutation and returns its `data` member.
    pub(crate) async fn graphql<V: Serialize + Send, R: DeserializeOwned>(
        &self,
        query: &str,
        variables: V,
    ) -> Result<R, BoardApiError> {
        let request = self
            .http
            .post(&self.graphql_url)
            .json(&GraphQlRequest { query, variables });
        let response: GraphQlResponse<R> = self.send("graphql", request).await?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            return Err(BoardApiError::GraphQl {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        response.data.ok_or_else(|| BoardApiError::MissingData {
            what: "GraphQL data".to_string(),
        })
    }

    async fn send<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<R, BoardApiError> {
        let transport = |e: reqwest::Error| BoardApiError::Transport {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        };

        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;
        debug!(endpoint, status = status.as_u16(), "GitHub API responded");

        if !status.is_success() {
            return Err(BoardApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| BoardApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_token() {
        let config = GitHubClientConfig::new("ghs_secret_value");

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("ghs_secret_value"), "{rendered}");
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains(DEFAULT_API_URL));
    }
}

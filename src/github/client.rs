//! HTTP client for the two GitHub capabilities the app consumes
//!
//! The credential is an explicit argument of every call. The client itself
//! holds no auth state, so a rebuilt credential can never leak into (or be
//! missed by) a client that was constructed earlier.

use super::types::{
    ApiErrorBody, ContributorQuery, RawContributor, RawRepository, RepositoryQuery,
    SearchResponse,
};
use super::{Credential, RemoteQueryError};
use chrono::DateTime;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default public API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// User agent sent with every request (GitHub rejects requests without one)
pub const USER_AGENT: &str = concat!("repo-scout/", env!("CARGO_PKG_VERSION"));

const API_VERSION: &str = "2022-11-28";

/// Thin wrapper around `reqwest::Client` bound to one API root
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    /// Build a client for `api_url` with a per-request timeout
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, RemoteQueryError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteQueryError::network(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `GET /search/repositories?q={text} in:name`
    ///
    /// Blank search text never reaches the network; the API answers it with a
    /// 422, and an empty page is the meaningful result.
    pub async fn search_repositories(
        &self,
        credential: &Credential,
        query: &RepositoryQuery,
    ) -> Result<Vec<RawRepository>, RemoteQueryError> {
        let text = query.text.trim();
        if text.is_empty() {
            tracing::debug!("Blank search text, skipping request");
            return Ok(Vec::new());
        }

        let url = format!("{}/search/repositories", self.api_url);
        let request = self.get(&url, credential).query(&[
            ("q", format!("{text} in:name")),
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ]);

        let body: Option<SearchResponse<RawRepository>> = send_json(request).await?;
        let Some(body) = body else {
            return Ok(Vec::new());
        };
        if body.incomplete_results {
            tracing::warn!("Search for {:?} returned incomplete results", text);
        }
        Ok(body.items)
    }

    /// `GET /repos/{owner}/{repo}/contributors`
    pub async fn list_contributors(
        &self,
        credential: &Credential,
        query: &ContributorQuery,
    ) -> Result<Vec<RawContributor>, RemoteQueryError> {
        let url = format!(
            "{}/repos/{}/{}/contributors",
            self.api_url, query.owner, query.repo
        );
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if query.include_anonymous {
            params.push(("anon", "1".to_string()));
        }

        let request = self.get(&url, credential).query(&params);
        let body: Option<Vec<RawContributor>> = send_json(request).await?;
        Ok(body.unwrap_or_default())
    }

    fn get(&self, url: &str, credential: &Credential) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);

        match credential.bearer() {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

/// Send a request and decode a JSON body
///
/// Returns `Ok(None)` for `204 No Content` (GitHub's answer for an empty
/// repository's contributor list).
async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Option<T>, RemoteQueryError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(error_from_response(response).await);
    }

    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| RemoteQueryError::decode(e.to_string()))
}

async fn error_from_response(response: Response) -> RemoteQueryError {
    let status = response.status();
    let headers = response.headers().clone();
    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    if is_rate_limited(status, &headers, &message) {
        return RemoteQueryError::RateLimited {
            reset_at: rate_limit_reset(&headers),
        };
    }

    RemoteQueryError::http(status.as_u16(), message)
}

fn is_rate_limited(status: StatusCode, headers: &HeaderMap, message: &str) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    if status != StatusCode::FORBIDDEN {
        return false;
    }
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    // Secondary limits keep a non-zero remaining count and only say so in the body
    exhausted || message.to_lowercase().contains("rate limit")
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<chrono::DateTime<chrono::Utc>> {
    let secs: i64 = headers
        .get("x-ratelimit-reset")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    DateTime::from_timestamp(secs, 0)
}

/// HTTP adapter for the public events endpoint.
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::errors::ActivityError;

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "github-activity-cli";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const HEADER_RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
const HEADER_RATELIMIT_RESET: &str = "x-ratelimit-reset";

/// A successful events response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// The body exactly as parsed; normally an array of event objects.
    pub events: Value,
    /// Raw `x-ratelimit-remaining` header.
    pub rate_limit_remaining: Option<String>,
    /// `x-ratelimit-reset` header as epoch seconds.
    pub rate_limit_reset: Option<i64>,
}

/// Client for `GET /users/{account}/events`.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Build a client rooted at `base_url` (normally [`DEFAULT_API_URL`]).
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` if the URL does not parse or cannot carry a path,
    /// and `Transport` if the TLS backend fails to initialise.
    pub fn new(base_url: &str) -> Result<Self, ActivityError> {
        let parsed = Url::parse(base_url).map_err(|err| ActivityError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ActivityError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot have a path".to_owned(),
            });
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .build()
            .map_err(|err| ActivityError::transport(&err))?;

        Ok(Self {
            http,
            base_url: parsed,
        })
    }

    /// The events URL for `account`, with the account percent-encoded as one segment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` if the base URL cannot carry a path.
    pub fn events_url(&self, account: &str, per_page: u8) -> Result<Url, ActivityError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ActivityError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot have a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(["users", account, "events"]);
        url.query_pairs_mut()
            .clear()
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    /// Fetch one page of public events for `account`.
    ///
    /// Sends exactly one request. No retries.
    ///
    /// # Errors
    ///
    /// Returns the classified `ActivityError` for non-2xx statuses, unparsable
    /// bodies, and transport failures.
    pub async fn fetch_events(
        &self,
        account: &str,
        per_page: u8,
    ) -> Result<ApiResponse, ActivityError> {
        let url = self.events_url(account, per_page)?;
        tracing::debug!(%url, "requesting events");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| ActivityError::transport(&err))?;

        let status = response.status();
        let remaining = header_str(response.headers(), HEADER_RATELIMIT_REMAINING);
        let reset = header_str(response.headers(), HEADER_RATELIMIT_RESET)
            .and_then(|v| v.trim().parse::<i64>().ok());
        tracing::debug!(
            status = status.as_u16(),
            rate_limit_remaining = remaining.as_deref().unwrap_or("-"),
            rate_limit_reset = ?reset,
            "response received"
        );

        let body = response
            .text()
            .await
            .map_err(|err| ActivityError::transport(&err))?;

        classify_response(account, status, remaining, reset, &body)
    }
}

/// Turn a completed response into events or a classified error.
///
/// # Errors
///
/// See [`GitHubClient::fetch_events`].
pub fn classify_response(
    account: &str,
    status: StatusCode,
    rate_limit_remaining: Option<String>,
    rate_limit_reset: Option<i64>,
    body: &str,
) -> Result<ApiResponse, ActivityError> {
    if status.is_success() {
        let events = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body).map_err(|err| ActivityError::InvalidResponse {
                message: err.to_string(),
            })?
        };
        return Ok(ApiResponse {
            events,
            rate_limit_remaining,
            rate_limit_reset,
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ActivityError::NotFound {
            account: account.to_owned(),
        });
    }

    if status == StatusCode::FORBIDDEN && rate_limit_remaining.as_deref() == Some("0") {
        return Err(ActivityError::RateLimited {
            reset_epoch: rate_limit_reset,
        });
    }

    Err(ActivityError::Http {
        status: status.as_u16(),
        body: body.to_owned(),
    })
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

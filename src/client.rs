use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUESTS, CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS};
use crate::types::{ChatRequest, ChatResponse, HealthStatus};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8008/api/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Fallback shown when a rejection carries no parseable detail.
const GENERIC_REJECTION: &str = "Could not reach server.";

/// Client for the chat assistant service.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl ChatClient {
    /// Create a new client against the default local endpoint.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// `base_url` is the API prefix the `chat` and `health` paths hang off
    /// of; a missing trailing slash is tolerated.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Url::parse(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The API prefix this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|val| val.to_str().ok())
            .map(String::from);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // The service reports rejections as {"detail": "..."}.
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<String>,
        }

        let detail = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.detail)
                .unwrap_or_else(|| GENERIC_REJECTION.to_string()),
            Err(_) => GENERIC_REJECTION.to_string(),
        };

        match status_code {
            400 => Error::bad_request(detail, None),
            404 => Error::not_found(detail),
            408 => Error::timeout(detail, None),
            429 => Error::rate_limit(detail, retry_after),
            500 => Error::internal_server(detail, request_id),
            502..=504 => Error::service_unavailable(detail, retry_after),
            _ => Error::api(status_code, detail, request_id),
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Send one chat exchange to the service.
    ///
    /// This is the single network call of the send cycle: a POST of the
    /// request body, answered by a parsed [`ChatResponse`] or an error from
    /// the taxonomy in [`crate::error`].
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}chat", self.base_url);

        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let outcome = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(request)
            .send()
            .await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        let response = outcome.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            self.map_transport_error(e)
        })?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatResponse>().await.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Probe the service health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}health", self.base_url);

        CLIENT_REQUESTS.click();
        let response = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                CLIENT_REQUEST_ERRORS.click();
                self.map_transport_error(e)
            })?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<HealthStatus>().await.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        let client = ChatClient::new().unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_added() {
        let client =
            ChatClient::with_options(Some("http://localhost:9000/api/v1".to_string()), None)
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/api/v1/");
    }

    #[test]
    fn invalid_endpoint_rejected() {
        let result = ChatClient::with_options(Some("not a url".to_string()), None);
        assert!(matches!(result, Err(Error::Url { .. })));
    }
}

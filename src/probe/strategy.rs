//! Fetch strategies.
//!
//! A strategy turns one URL into one piece of [`Evidence`]. The prober runs an
//! ordered list of them per protocol, so alternative ways of fetching (a raw
//! socket client, a headless browser pool) plug in without touching the
//! classifier.

use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::Method;

use crate::config::MAX_HEADER_COUNT;
use crate::error_handling::{categorize_reqwest_error, InitializationError, TransportFailureKind};
use crate::initialization::init_client;
use crate::probe::config::ProbeConfig;
use crate::probe::evidence::{Evidence, HttpResult, TransportFailure};

/// One way of fetching a URL.
///
/// Implementations must never fail: every error becomes
/// [`Evidence::Transport`]. Any status code below 600 is an
/// [`Evidence::Http`], including 4xx and 5xx.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetches `url` according to `config`.
    async fn attempt(&self, url: &str, config: &ProbeConfig) -> Evidence;
}

/// Fetches with a shared `reqwest::Client`.
///
/// Client-level settings (redirect limit, TLS verification, connect timeout)
/// are fixed when the strategy is built; the per-request timeout, headers,
/// HEAD-first and body limit come from the config passed to each attempt.
pub struct ReqwestStrategy {
    client: reqwest::Client,
}

impl ReqwestStrategy {
    /// Builds the strategy and its HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: &ProbeConfig) -> Result<Self, InitializationError> {
        Ok(Self {
            client: init_client(config)?,
        })
    }

    /// Wraps an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        config: &ProbeConfig,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let builder = self
            .client
            .request(method, url)
            .timeout(config.timeout);
        config.headers.apply_to_request_builder(builder).send().await
    }
}

#[async_trait]
impl FetchStrategy for ReqwestStrategy {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn attempt(&self, url: &str, config: &ProbeConfig) -> Evidence {
        if config.head_first {
            match self.send(Method::HEAD, url, config).await {
                Ok(response) if response.status().is_success() || response.status().is_redirection() => {
                    debug!("HEAD {url} answered {}", response.status());
                    return capture_response(response, url, 0).await;
                }
                Ok(response) => {
                    debug!("HEAD {url} answered {}, retrying with GET", response.status());
                }
                Err(e) => {
                    debug!("HEAD {url} failed ({e}), retrying with GET");
                }
            }
        }

        match self.send(Method::GET, url, config).await {
            Ok(response) => capture_response(response, url, config.max_body_bytes).await,
            Err(e) => {
                let kind = categorize_reqwest_error(&e);
                debug!(
                    "GET {url} failed: {kind} ({e}) (is_timeout: {}, is_connect: {}, is_request: {})",
                    e.is_timeout(),
                    e.is_connect(),
                    e.is_request()
                );
                TransportFailure::fetch(kind, url, error_chain_text(&e)).into()
            }
        }
    }
}

/// Turns a response into evidence, reading at most `max_body_bytes` of body.
///
/// Body read errors (reset mid-body, decompression failure, timeout) keep
/// whatever was read so far: the status line already proves the origin answered.
async fn capture_response(
    mut response: reqwest::Response,
    url: &str,
    max_body_bytes: usize,
) -> Evidence {
    let status = response.status().as_u16();
    let final_url = response.url().to_string();

    if status >= 600 {
        return TransportFailure::fetch(
            TransportFailureKind::Other,
            url,
            format!("invalid HTTP status {status}"),
        )
        .into();
    }

    let mut result = capture_headers(HttpResult::new(status, final_url), response.headers(), url);

    let mut body: Vec<u8> = Vec::new();
    let mut truncated = false;
    while body.len() < max_body_bytes {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let room = max_body_bytes - body.len();
                if chunk.len() > room {
                    body.extend_from_slice(&chunk[..room]);
                    truncated = true;
                    break;
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => {
                debug!(
                    "Body read from {url} interrupted after {} bytes: {e}",
                    body.len()
                );
                break;
            }
        }
    }
    // Filled the buffer exactly: only truncated if more data follows
    if !truncated && max_body_bytes > 0 && body.len() >= max_body_bytes {
        truncated = matches!(response.chunk().await, Ok(Some(chunk)) if !chunk.is_empty());
    }

    result.body_length = body.len();
    result.body = String::from_utf8_lossy(&body).into_owned();
    result.body_truncated = truncated;
    result.into()
}

/// Copies up to [`MAX_HEADER_COUNT`] headers into `result`.
fn capture_headers(mut result: HttpResult, headers: &HeaderMap, url: &str) -> HttpResult {
    if headers.len() > MAX_HEADER_COUNT {
        debug!(
            "{url} sent {} headers, keeping the first {MAX_HEADER_COUNT}",
            headers.len()
        );
    }
    for (name, value) in headers.iter().take(MAX_HEADER_COUNT) {
        result = result.with_header(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    result
}

/// Joins an error and all of its sources into one diagnostic line.
fn error_chain_text(error: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        parts.push(err.to_string());
        current = err.source();
    }
    parts.join(": ")
}

//! Probe configuration.

use std::time::Duration;

use crate::config::{
    DEFAULT_ACCEPT, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_MAX_REDIRECTS, DEFAULT_REFERER,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_CAPTURED_BODY_SIZE, TCP_CONNECT_TIMEOUT_SECS,
};

/// Protocol a probe attempt is made over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// `https://`
    Https,
    /// `http://`
    Http,
}

impl Protocol {
    /// URL scheme for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Https => "https",
            Protocol::Http => "http",
        }
    }
}

/// Browser-like request headers sent with every probe.
///
/// Some origins answer requests that look automated with 403 or a challenge
/// page, so probes present themselves as a desktop Chrome arriving from a
/// search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    /// Also set as the client's default User-Agent.
    pub user_agent: String,
    /// `Accept`
    pub accept: String,
    /// `Accept-Language`
    pub accept_language: String,
    /// `Referer`, a search engine by default
    pub referer: String,
    /// Additional headers sent verbatim.
    pub extra: Vec<(String, String)>,
}

impl Default for RequestHeaders {
    fn default() -> Self {
        Self::browser(DEFAULT_USER_AGENT)
    }
}

impl RequestHeaders {
    /// The default browser header set with the given User-Agent.
    pub fn browser(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            extra: vec![
                ("cache-control".to_string(), "no-cache".to_string()),
                ("pragma".to_string(), "no-cache".to_string()),
                ("upgrade-insecure-requests".to_string(), "1".to_string()),
            ],
        }
    }

    /// Applies these headers to a `reqwest::RequestBuilder`.
    ///
    /// Extra headers with names or values reqwest rejects are skipped with a
    /// debug log rather than failing the request.
    pub(crate) fn apply_to_request_builder(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        let mut builder = builder
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT, &self.accept)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .header(reqwest::header::REFERER, &self.referer);

        for (name, value) in &self.extra {
            match (
                reqwest::header::HeaderName::from_bytes(name.as_bytes()),
                reqwest::header::HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => builder = builder.header(name, value),
                _ => log::debug!("Skipping invalid extra request header {name}: {value}"),
            }
        }
        builder
    }
}

/// How probes are issued.
///
/// `verify_tls` is deliberately off by default: an expired or self-signed
/// certificate is a warning page for a human visitor, not an outage. Turn it
/// on only when certificate validity is part of what "up" means.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-attempt timeout (connect, TLS, redirects and body read).
    pub timeout: Duration,
    /// TCP connect timeout, bounded by `timeout`.
    pub connect_timeout: Duration,
    /// Redirects followed before the last response is taken as final.
    pub max_redirects: usize,
    /// Reject invalid certificates.
    pub verify_tls: bool,
    /// Headers sent with every request.
    pub headers: RequestHeaders,
    /// Protocols attempted in order until one yields an HTTP response.
    pub protocols: Vec<Protocol>,
    /// Resolve the hostname when every protocol attempt failed.
    pub dns_fallback: bool,
    /// Try HEAD before GET.
    pub head_first: bool,
    /// Body bytes captured per response.
    pub max_body_bytes: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            verify_tls: false,
            headers: RequestHeaders::default(),
            protocols: vec![Protocol::Https, Protocol::Http],
            dns_fallback: true,
            head_first: false,
            max_body_bytes: MAX_CAPTURED_BODY_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_probe_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.protocols, vec![Protocol::Https, Protocol::Http]);
        assert!(!config.verify_tls);
        assert!(config.dns_fallback);
        assert!(!config.head_first);
        assert_eq!(config.max_redirects, 5);
        assert!(config.connect_timeout <= config.timeout);
    }

    #[test]
    fn test_protocol_scheme() {
        assert_eq!(Protocol::Https.scheme(), "https");
        assert_eq!(Protocol::Http.scheme(), "http");
    }

    #[test]
    fn test_browser_headers() {
        let headers = RequestHeaders::browser("custom-agent");
        assert_eq!(headers.user_agent, "custom-agent");
        assert!(headers.accept.starts_with("text/html"));
        assert!(headers.referer.starts_with("https://"));
        assert!(headers
            .extra
            .iter()
            .any(|(name, value)| name == "cache-control" && value == "no-cache"));
    }
}

//! Evidence gathered by probe attempts.
//!
//! Evidence is immutable once captured. A single check accumulates a short
//! ordered sequence of it: one entry per protocol/strategy attempt, plus an
//! optional DNS-only check at the end.

use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::error_handling::TransportFailureKind;

/// Outcome of one probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    /// The origin answered with an HTTP response (any status below 600).
    Http(HttpResult),
    /// No HTTP response was obtained.
    Transport(TransportFailure),
    /// DNS-only fallback check resolved the hostname.
    DnsResolved(DnsResolution),
}

impl Evidence {
    /// True for [`Evidence::Transport`].
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Evidence::Transport(_))
    }

    /// The HTTP response, if this evidence is one.
    pub fn as_http(&self) -> Option<&HttpResult> {
        match self {
            Evidence::Http(result) => Some(result),
            _ => None,
        }
    }

    /// The transport failure, if this evidence is one.
    pub fn as_transport_failure(&self) -> Option<&TransportFailure> {
        match self {
            Evidence::Transport(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<HttpResult> for Evidence {
    fn from(result: HttpResult) -> Self {
        Evidence::Http(result)
    }
}

impl From<TransportFailure> for Evidence {
    fn from(failure: TransportFailure) -> Self {
        Evidence::Transport(failure)
    }
}

/// An HTTP response as seen by the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResult {
    /// Response status code (100..=599).
    pub status: u16,
    /// Response headers, names lowercased; repeated headers joined with ", ".
    pub headers: BTreeMap<String, String>,
    /// Captured body, lossily decoded as UTF-8. Possibly truncated.
    pub body: String,
    /// Number of body bytes captured.
    pub body_length: usize,
    /// True when the body was cut at the capture limit.
    pub body_truncated: bool,
    /// URL reached after following redirects.
    pub final_url: String,
}

impl HttpResult {
    /// A response with the given status and nothing else.
    pub fn new(status: u16, final_url: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: String::new(),
            body_length: 0,
            body_truncated: false,
            final_url: final_url.into(),
        }
    }

    /// Adds a header; the name is lowercased.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        self.headers
            .entry(name.to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
        self
    }

    /// Sets the body; its length is taken from the text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self.body_length = self.body.len();
        self.body_truncated = false;
        self
    }

    /// Looks up a header by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Which part of the probe produced a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    /// An HTTP fetch attempt.
    Fetch,
    /// The DNS-only fallback check.
    DnsCheck,
}

/// A probe attempt that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// What went wrong.
    pub kind: TransportFailureKind,
    /// Which step failed.
    pub stage: ProbeStage,
    /// URL fetched, or hostname resolved for the DNS check.
    pub target: String,
    /// Diagnostic text of the underlying error.
    pub message: String,
}

impl TransportFailure {
    /// A failure of an HTTP fetch attempt.
    pub fn fetch(
        kind: TransportFailureKind,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            stage: ProbeStage::Fetch,
            target: url.into(),
            message: message.into(),
        }
    }

    /// The DNS-only check could not resolve the hostname.
    pub fn dns_check(host: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: TransportFailureKind::DnsNotFound,
            stage: ProbeStage::DnsCheck,
            target: host.into(),
            message: message.into(),
        }
    }
}

/// Addresses the DNS-only check resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResolution {
    /// Hostname looked up, port removed.
    pub host: String,
    /// At least one address.
    pub addresses: Vec<IpAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header_lowercases_and_joins() {
        let result = HttpResult::new(200, "https://example.com/")
            .with_header("Set-Cookie", "a=1")
            .with_header("set-cookie", "b=2")
            .with_header("Server", "nginx");

        assert_eq!(result.header("SERVER"), Some("nginx"));
        assert_eq!(result.header("set-cookie"), Some("a=1, b=2"));
        assert_eq!(result.header("x-missing"), None);
    }

    #[test]
    fn test_with_body_sets_length() {
        let result = HttpResult::new(200, "https://example.com/").with_body("hello");
        assert_eq!(result.body_length, 5);
        assert!(!result.body_truncated);
    }

    #[test]
    fn test_evidence_accessors() {
        let http: Evidence = HttpResult::new(404, "http://example.com/").into();
        assert!(!http.is_transport_failure());
        assert_eq!(http.as_http().map(|r| r.status), Some(404));

        let failure: Evidence = TransportFailure::fetch(
            TransportFailureKind::Timeout,
            "https://example.com",
            "timed out",
        )
        .into();
        assert!(failure.is_transport_failure());
        assert!(failure.as_http().is_none());
        assert_eq!(
            failure.as_transport_failure().map(|f| f.stage),
            Some(ProbeStage::Fetch)
        );
    }

    #[test]
    fn test_dns_check_failure_kind() {
        let failure = TransportFailure::dns_check("example.com", "NXDOMAIN");
        assert_eq!(failure.kind, TransportFailureKind::DnsNotFound);
        assert_eq!(failure.stage, ProbeStage::DnsCheck);
    }
}

//! Transport error categorization.
//!
//! Maps the error a fetch produced onto a [`TransportFailureKind`]. reqwest
//! wraps the interesting part (an `io::Error`, a resolver message, a rustls
//! alert) several layers deep, so the whole source chain is inspected.

use std::error::Error as StdError;
use std::io::ErrorKind;

use super::types::TransportFailureKind;

const DNS_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "no such host",
    "nodename nor servname",
    "no record found",
    "nxdomain",
];

const TLS_MARKERS: &[&str] = &[
    "certificate",
    "tls",
    "ssl",
    "handshake",
    "invalid peer",
    "alert",
];

/// Categorizes a `reqwest::Error` into a [`TransportFailureKind`].
///
/// Timeouts are taken from reqwest's own flag first; everything else is
/// decided by [`categorize_error_chain`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportFailureKind {
    if error.is_timeout() {
        return TransportFailureKind::Timeout;
    }
    categorize_error_chain(error)
}

/// Categorizes an arbitrary error by walking its source chain.
///
/// `io::Error` kinds win over message text; message markers are only
/// consulted when no conclusive `io::Error` is found.
pub fn categorize_error_chain(error: &(dyn StdError + 'static)) -> TransportFailureKind {
    let mut messages = Vec::new();
    let mut current = Some(error);

    while let Some(err) = current {
        if let Some(io_error) = err.downcast_ref::<std::io::Error>() {
            match io_error.kind() {
                ErrorKind::ConnectionRefused => return TransportFailureKind::ConnectionRefused,
                ErrorKind::ConnectionReset
                | ErrorKind::ConnectionAborted
                | ErrorKind::BrokenPipe
                | ErrorKind::UnexpectedEof => return TransportFailureKind::ConnectionReset,
                ErrorKind::TimedOut => return TransportFailureKind::Timeout,
                _ => {}
            }
        }
        messages.push(err.to_string().to_lowercase());
        current = err.source();
    }

    let text = messages.join(": ");
    categorize_message(&text)
}

/// Categorizes a lowercase error description by its wording.
fn categorize_message(text: &str) -> TransportFailureKind {
    if text.contains("timed out") || text.contains("timeout") {
        TransportFailureKind::Timeout
    } else if DNS_MARKERS.iter().any(|marker| text.contains(marker)) {
        TransportFailureKind::DnsNotFound
    } else if text.contains("connection refused") {
        TransportFailureKind::ConnectionRefused
    } else if text.contains("connection reset")
        || text.contains("connection closed")
        || text.contains("broken pipe")
    {
        TransportFailureKind::ConnectionReset
    } else if TLS_MARKERS.iter().any(|marker| text.contains(marker)) {
        TransportFailureKind::TlsError
    } else {
        TransportFailureKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    /// Error with a configurable message and source, mimicking reqwest's layering.
    #[derive(Debug)]
    struct Layer {
        message: &'static str,
        source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    }

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.source.as_deref().map(|e| e as _)
        }
    }

    fn wrap(message: &'static str, inner: impl StdError + Send + Sync + 'static) -> Layer {
        Layer {
            message,
            source: Some(Box::new(inner)),
        }
    }

    fn leaf(message: &'static str) -> Layer {
        Layer {
            message,
            source: None,
        }
    }

    #[test]
    fn test_io_connection_refused_in_chain() {
        let err = wrap(
            "error sending request",
            wrap(
                "tcp connect error",
                std::io::Error::from(ErrorKind::ConnectionRefused),
            ),
        );
        assert_eq!(
            categorize_error_chain(&err),
            TransportFailureKind::ConnectionRefused
        );
    }

    #[test]
    fn test_io_connection_reset_in_chain() {
        let err = wrap(
            "error sending request",
            std::io::Error::from(ErrorKind::ConnectionReset),
        );
        assert_eq!(
            categorize_error_chain(&err),
            TransportFailureKind::ConnectionReset
        );
    }

    #[test]
    fn test_dns_failure_message() {
        let err = wrap(
            "error sending request",
            wrap(
                "dns error",
                std::io::Error::other("failed to lookup address information: Name or service not known"),
            ),
        );
        assert_eq!(
            categorize_error_chain(&err),
            TransportFailureKind::DnsNotFound
        );
    }

    #[test]
    fn test_tls_failure_message() {
        let err = wrap(
            "error sending request",
            leaf("invalid peer certificate: UnknownIssuer"),
        );
        assert_eq!(categorize_error_chain(&err), TransportFailureKind::TlsError);
    }

    #[test]
    fn test_timeout_message() {
        let err = wrap("error sending request", leaf("operation timed out"));
        assert_eq!(categorize_error_chain(&err), TransportFailureKind::Timeout);
    }

    #[test]
    fn test_unknown_error_is_other() {
        let err = leaf("builder error: relative URL without a base");
        assert_eq!(categorize_error_chain(&err), TransportFailureKind::Other);
    }

    #[test]
    fn test_io_kind_beats_message() {
        // A refused connection whose outer message mentions TLS is still refused
        let err = wrap(
            "tls connect error",
            std::io::Error::from(ErrorKind::ConnectionRefused),
        );
        assert_eq!(
            categorize_error_chain(&err),
            TransportFailureKind::ConnectionRefused
        );
    }
}

//! Error type definitions.
//!
//! This module defines the input, initialization, and transport failure types
//! used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Raw input that cannot be normalized into a hostname.
///
/// Surfaced to the caller as a rejection; such input is never probed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Nothing left after stripping scheme, `www.` and path.
    #[error("no hostname provided")]
    Empty,

    /// Hostname shorter than the minimum length.
    #[error("hostname too short ({0} characters)")]
    TooShort(usize),

    /// Hostname longer than 253 characters.
    #[error("hostname too long ({0} characters, maximum is 253)")]
    TooLong(usize),

    /// Hostname without any `.`.
    #[error("hostname must contain a dot")]
    MissingDot,

    /// Whitespace or control character inside the hostname.
    #[error("hostname contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error binding the HTTP listener.
    #[error("Failed to bind server to port {port}: {source}")]
    BindError {
        /// Port that could not be bound
        port: u16,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Transport-level reasons a probe attempt produced no HTTP response.
///
/// HTTP status codes are never transport failures; a 503 is evidence, a
/// refused connection is this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportFailureKind {
    /// The attempt exceeded its timeout and was aborted.
    Timeout,
    /// The hostname does not resolve.
    DnsNotFound,
    /// Nothing listens on the target port.
    ConnectionRefused,
    /// The peer reset or closed the connection mid-exchange.
    ConnectionReset,
    /// TLS handshake failed (or certificate rejected with verification on).
    TlsError,
    /// Anything else (malformed URL, redirect loop, protocol errors).
    Other,
}

impl std::fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransportFailureKind {
    /// Kebab-case name, also used as the transport verdict reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportFailureKind::Timeout => "timeout",
            TransportFailureKind::DnsNotFound => "dns-not-found",
            TransportFailureKind::ConnectionRefused => "connection-refused",
            TransportFailureKind::ConnectionReset => "connection-reset",
            TransportFailureKind::TlsError => "tls-error",
            TransportFailureKind::Other => "other",
        }
    }
}

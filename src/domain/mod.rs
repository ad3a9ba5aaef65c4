//! Domain normalization.
//!
//! Turns whatever a user typed ("HTTPS://WWW.Example.com/path?q=1", " example.com ")
//! into a canonical [`Target`]: lowercase, no scheme, no leading `www.`, no path,
//! query or fragment. Normalization is a pure function of its input and never touches
//! the network.

use std::fmt;

use crate::config::{MAX_HOSTNAME_LENGTH, MIN_HOSTNAME_LENGTH};
use crate::error_handling::InvalidInputError;
use crate::probe::Protocol;

const SCHEME_PREFIXES: [&str; 2] = ["http://", "https://"];
const WWW_PREFIX: &str = "www.";

/// A normalized hostname under evaluation.
///
/// Only [`normalize`] constructs one, so every `Target` satisfies the hostname
/// invariants (lowercase, contains a dot, 3..=253 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    hostname: String,
}

impl Target {
    /// The normalized hostname, including an explicit port if the input had one.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// The hostname with any `:port` suffix removed.
    ///
    /// Used for DNS lookups and platform matching, which never involve ports.
    pub fn host(&self) -> &str {
        match self.hostname.rsplit_once(':') {
            Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
                host
            }
            _ => &self.hostname,
        }
    }

    /// The probe URL for this target over the given protocol.
    pub fn url(&self, protocol: Protocol) -> String {
        format!("{}://{}", protocol.scheme(), self.hostname)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hostname)
    }
}

/// Normalizes raw user input into a [`Target`].
///
/// Steps, in order: trim whitespace, lowercase, strip a leading `http://` or
/// `https://`, strip a leading `www.`, cut at the first `/` or `?`. Prefix
/// stripping repeats until nothing changes, which keeps the function
/// idempotent for inputs such as `www.www.example.com`.
///
/// # Errors
///
/// Returns [`InvalidInputError`] when the remaining hostname is empty, shorter
/// than 3 or longer than 253 characters, has no `.`, or contains whitespace or
/// control characters.
pub fn normalize(raw: &str) -> Result<Target, InvalidInputError> {
    let lowered = raw.trim().to_lowercase();

    let mut rest = lowered.as_str();
    loop {
        let before = rest.len();
        for prefix in SCHEME_PREFIXES {
            if let Some(stripped) = rest.strip_prefix(prefix) {
                rest = stripped;
            }
        }
        if let Some(stripped) = rest.strip_prefix(WWW_PREFIX) {
            rest = stripped;
        }
        if rest.len() == before {
            break;
        }
    }

    let hostname = match rest.find(['/', '?', '#']) {
        Some(end) => &rest[..end],
        None => rest,
    };

    if hostname.is_empty() {
        return Err(InvalidInputError::Empty);
    }
    let length = hostname.chars().count();
    if length < MIN_HOSTNAME_LENGTH {
        return Err(InvalidInputError::TooShort(length));
    }
    if length > MAX_HOSTNAME_LENGTH {
        return Err(InvalidInputError::TooLong(length));
    }
    if !hostname.contains('.') {
        return Err(InvalidInputError::MissingDot);
    }
    if let Some(c) = hostname
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        return Err(InvalidInputError::InvalidCharacter(c));
    }

    Ok(Target {
        hostname: hostname.to_string(),
    })
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}

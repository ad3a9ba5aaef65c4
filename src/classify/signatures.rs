//! Signature sets used by the classifier.
//!
//! All matching is case-insensitive substring matching against lowercased
//! input, except hostnames, which match exactly or as a parent domain. The
//! lists are heuristics; [`Signatures`] can be built with different ones.

use once_cell::sync::Lazy;
use std::sync::Arc;

/// Phrases that appear on parking and for-sale placeholder pages.
const PARKED_BODY_PHRASES: &[&str] = &[
    "this domain is for sale",
    "this domain may be for sale",
    "domain is for sale",
    "domain for sale",
    "buy this domain",
    "the domain name is for sale",
    "this domain name is parked",
    "this domain is parked",
    "parked free, courtesy of",
    "domain parking",
    "this web page is parked",
    "sedoparking",
    "parkingcrew",
    "bodis.com",
    "hugedomains.com",
    "afternic",
    "this domain has expired",
];

/// Hosts that serve parking or marketplace landers.
const PARKED_HOSTS: &[&str] = &[
    "sedo.com",
    "sedoparking.com",
    "parkingcrew.net",
    "bodis.com",
    "dan.com",
    "afternic.com",
    "hugedomains.com",
    "undeveloped.com",
    "above.com",
    "parklogic.com",
    "domainmarket.com",
];

/// URL fragments that mark a parking lander regardless of host.
const PARKED_URL_MARKERS: &[&str] = &["sedoparking", "parkingcrew", "/lander", "domain-for-sale"];

/// Header values naming an edge/CDN/anti-bot provider.
const PROTECTION_HEADER_VALUES: &[&str] = &[
    "cloudflare",
    "akamaighost",
    "akamai",
    "sucuri",
    "incapsula",
    "imperva",
    "ddos-guard",
    "stackpath",
    "datadome",
    "perimeterx",
];

/// Header names only those providers set.
const PROTECTION_HEADER_NAMES: &[&str] = &[
    "cf-ray",
    "cf-mitigated",
    "cf-chl-bypass",
    "x-sucuri-id",
    "x-iinfo",
    "x-datadome",
    "x-px-block",
];

/// Body fragments of challenge and block pages.
const PROTECTION_BODY_MARKERS: &[&str] = &[
    "/cdn-cgi/challenge-platform",
    "cf-browser-verification",
    "cf_chl_opt",
    "<title>just a moment...</title>",
    "attention required! | cloudflare",
    "checking your browser before accessing",
    "ddos protection by",
    "sucuri website firewall",
    "incapsula incident id",
    "_incapsula_resource",
    "captcha-delivery.com",
    "px-captcha",
    "ddos-guard",
];

/// Platforms that routinely answer automated clients with 401/403/429.
const BOT_BLOCKING_PLATFORMS: &[&str] = &[
    "twitter.com",
    "x.com",
    "instagram.com",
    "facebook.com",
    "linkedin.com",
    "tiktok.com",
    "reddit.com",
    "pinterest.com",
    "quora.com",
    "amazon.com",
    "youtube.com",
    "netflix.com",
    "threads.net",
    "discord.com",
    "glassdoor.com",
    "indeed.com",
];

static DEFAULT_SIGNATURES: Lazy<Arc<Signatures>> = Lazy::new(|| Arc::new(Signatures::builtin()));

/// Read-only signature sets shared by every classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signatures {
    /// Lowercase phrases found in parked page bodies
    pub parked_body_phrases: Vec<String>,
    /// Parking and marketplace hosts, matched against the final URL's host
    pub parked_hosts: Vec<String>,
    /// Lowercase fragments of parked final URLs
    pub parked_url_markers: Vec<String>,
    /// Lowercase fragments of any header value (e.g. `server: cloudflare`)
    pub protection_header_values: Vec<String>,
    /// Lowercase header names set only by protection providers
    pub protection_header_names: Vec<String>,
    /// Lowercase fragments of challenge and block page bodies
    pub protection_body_markers: Vec<String>,
    /// Hostnames of platforms known to block automated clients
    pub bot_blocking_platforms: Vec<String>,
}

impl Default for Signatures {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// True when `host` is `domain` or a subdomain of it.
fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

impl Signatures {
    /// The built-in lists.
    pub fn builtin() -> Self {
        Self {
            parked_body_phrases: owned(PARKED_BODY_PHRASES),
            parked_hosts: owned(PARKED_HOSTS),
            parked_url_markers: owned(PARKED_URL_MARKERS),
            protection_header_values: owned(PROTECTION_HEADER_VALUES),
            protection_header_names: owned(PROTECTION_HEADER_NAMES),
            protection_body_markers: owned(PROTECTION_BODY_MARKERS),
            bot_blocking_platforms: owned(BOT_BLOCKING_PLATFORMS),
        }
    }

    /// The process-wide built-in instance.
    pub fn shared() -> Arc<Signatures> {
        Arc::clone(&DEFAULT_SIGNATURES)
    }

    /// First parked signature found in a final URL.
    pub fn parked_url_match(&self, final_url: &str) -> Option<&str> {
        let lowered = final_url.to_lowercase();
        if let Ok(url) = url::Url::parse(&lowered) {
            if let Some(host) = url.host_str() {
                if let Some(hit) = self
                    .parked_hosts
                    .iter()
                    .find(|domain| host_matches(host, domain))
                {
                    return Some(hit.as_str());
                }
            }
        }
        self.parked_url_markers
            .iter()
            .find(|marker| lowered.contains(marker.as_str()))
            .map(String::as_str)
    }

    /// First parked phrase found in a lowercased body.
    pub fn parked_body_match(&self, lowered_body: &str) -> Option<&str> {
        self.parked_body_phrases
            .iter()
            .find(|phrase| lowered_body.contains(phrase.as_str()))
            .map(String::as_str)
    }

    /// First protection signature found in headers (lowercased names) or a lowercased body.
    pub fn protection_match<'a, I>(&'a self, headers: I, lowered_body: &str) -> Option<&'a str>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, value) in headers {
            if let Some(hit) = self
                .protection_header_names
                .iter()
                .find(|marker| name == *marker)
            {
                return Some(hit.as_str());
            }
            let value = value.to_lowercase();
            if let Some(hit) = self
                .protection_header_values
                .iter()
                .find(|marker| value.contains(marker.as_str()))
            {
                return Some(hit.as_str());
            }
        }
        self.protection_body_markers
            .iter()
            .find(|marker| lowered_body.contains(marker.as_str()))
            .map(String::as_str)
    }

    /// True when `host` is a known bot-blocking platform or a subdomain of one.
    pub fn is_bot_blocking_platform(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.bot_blocking_platforms
            .iter()
            .any(|platform| host_matches(&host, platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_host_matches() {
        assert!(host_matches("sedo.com", "sedo.com"));
        assert!(host_matches("www.sedo.com", "sedo.com"));
        assert!(!host_matches("jordan.com", "dan.com"));
        assert!(!host_matches("sedo.com.evil.net", "sedo.com"));
    }

    #[test]
    fn test_parked_url_by_host() {
        let signatures = Signatures::builtin();
        assert_eq!(
            signatures.parked_url_match("https://sedo.com/search/details/?domain=example.com"),
            Some("sedo.com")
        );
        assert_eq!(signatures.parked_url_match("https://jordan.com/"), None);
    }

    #[test]
    fn test_parked_url_by_marker() {
        let signatures = Signatures::builtin();
        assert_eq!(
            signatures.parked_url_match("http://example.com/lander"),
            Some("/lander")
        );
    }

    #[test]
    fn test_parked_body_match() {
        let signatures = Signatures::builtin();
        assert!(signatures
            .parked_body_match("<h1>this domain is for sale</h1>")
            .is_some());
        assert!(signatures
            .parked_body_match("<h1>welcome to our bakery</h1>")
            .is_none());
    }

    #[test]
    fn test_protection_match_header_value_and_name() {
        let signatures = Signatures::builtin();
        let mut headers = BTreeMap::new();
        headers.insert("server".to_string(), "Cloudflare".to_string());
        assert_eq!(signatures.protection_match(&headers, ""), Some("cloudflare"));

        let mut headers = BTreeMap::new();
        headers.insert("x-sucuri-id".to_string(), "18012".to_string());
        assert_eq!(
            signatures.protection_match(&headers, ""),
            Some("x-sucuri-id")
        );
    }

    #[test]
    fn test_protection_match_body() {
        let signatures = Signatures::builtin();
        let headers: BTreeMap<String, String> = BTreeMap::new();
        assert!(signatures
            .protection_match(&headers, "<title>just a moment...</title>")
            .is_some());
        assert!(signatures
            .protection_match(&headers, "<title>home</title>")
            .is_none());
    }

    #[test]
    fn test_bot_blocking_platform() {
        let signatures = Signatures::builtin();
        assert!(signatures.is_bot_blocking_platform("twitter.com"));
        assert!(signatures.is_bot_blocking_platform("mobile.twitter.com"));
        assert!(signatures.is_bot_blocking_platform("X.com"));
        assert!(!signatures.is_bot_blocking_platform("notx.com"));
        assert!(!signatures.is_bot_blocking_platform("example.com"));
    }

    #[test]
    fn test_shared_is_builtin() {
        assert_eq!(*Signatures::shared(), Signatures::builtin());
    }
}

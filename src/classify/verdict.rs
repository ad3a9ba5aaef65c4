//! Classification output.

use serde::Serialize;

/// Which classification rule produced a [`Verdict`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// No HTTP response was obtained.
    Transport,
    /// A CDN or anti-bot edge answered.
    EdgeProtection,
    /// A platform known to block automated clients answered 401/403/429.
    KnownPlatform,
    /// A small parking or for-sale page.
    ParkedDomain,
    /// Plain status-code semantics.
    StatusDefault,
}

impl RuleId {
    /// Kebab-case name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::Transport => "transport",
            RuleId::EdgeProtection => "edge-protection",
            RuleId::KnownPlatform => "known-platform",
            RuleId::ParkedDomain => "parked-domain",
            RuleId::StatusDefault => "status-default",
        }
    }
}

/// Final liveness decision.
///
/// Only `is_up` is authoritative; `reason` is diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Whether a human visitor would find the site reachable.
    pub is_up: bool,
    /// Human-readable explanation.
    pub reason: String,
    /// Rule that decided.
    #[serde(skip)]
    pub rule: RuleId,
}

impl Verdict {
    pub(crate) fn up(rule: RuleId, reason: impl Into<String>) -> Self {
        Self {
            is_up: true,
            reason: reason.into(),
            rule,
        }
    }

    pub(crate) fn down(rule: RuleId, reason: impl Into<String>) -> Self {
        Self {
            is_up: false,
            reason: reason.into(),
            rule,
        }
    }

    /// The worst-case verdict, used when nothing could be learned about the target.
    pub fn unable_to_connect() -> Self {
        Self::down(RuleId::Transport, "unable to connect")
    }
}

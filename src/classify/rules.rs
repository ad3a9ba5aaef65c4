//! The ordered decision table.
//!
//! Transport handling runs first and only when no HTTP response exists. With
//! a response in hand, [`RULES`] is walked top to bottom and the first rule
//! whose predicate holds decides. The final rule always matches.

use crate::domain::Target;
use crate::probe::{Evidence, HttpResult, ProbeStage};

use super::signatures::Signatures;
use super::verdict::{RuleId, Verdict};
use super::ClassifierConfig;

/// Everything a rule may look at.
pub(crate) struct RuleInput<'a> {
    pub result: &'a HttpResult,
    pub target: &'a Target,
    pub signatures: &'a Signatures,
    pub config: &'a ClassifierConfig,
    /// `result.body`, lowercased once for all rules.
    pub lowered_body: String,
}

impl<'a> RuleInput<'a> {
    pub fn new(
        result: &'a HttpResult,
        target: &'a Target,
        signatures: &'a Signatures,
        config: &'a ClassifierConfig,
    ) -> Self {
        Self {
            result,
            target,
            signatures,
            config,
            lowered_body: result.body.to_lowercase(),
        }
    }

    fn protection_signature(&self) -> Option<&'a str> {
        self.signatures
            .protection_match(&self.result.headers, &self.lowered_body)
    }

    fn parked_signature(&self) -> Option<&'a str> {
        self.signatures
            .parked_url_match(&self.result.final_url)
            .or_else(|| self.signatures.parked_body_match(&self.lowered_body))
    }
}

/// One row of the decision table.
pub(crate) struct Rule {
    pub id: RuleId,
    pub predicate: fn(&RuleInput<'_>) -> bool,
    pub verdict: fn(&RuleInput<'_>) -> Verdict,
}

/// Rules applied to an HTTP response, in precedence order.
pub(crate) const RULES: &[Rule] = &[
    Rule {
        id: RuleId::EdgeProtection,
        predicate: edge_protection_matches,
        verdict: edge_protection_verdict,
    },
    Rule {
        id: RuleId::KnownPlatform,
        predicate: known_platform_matches,
        verdict: known_platform_verdict,
    },
    Rule {
        id: RuleId::ParkedDomain,
        predicate: parked_domain_matches,
        verdict: parked_domain_verdict,
    },
    Rule {
        id: RuleId::StatusDefault,
        predicate: always,
        verdict: status_default_verdict,
    },
];

/// Statuses platforms use to turn away automated clients.
const BOT_BLOCK_STATUSES: [u16; 3] = [401, 403, 429];

fn edge_protection_matches(input: &RuleInput<'_>) -> bool {
    input.protection_signature().is_some()
}

fn edge_protection_verdict(input: &RuleInput<'_>) -> Verdict {
    let reason = match input.protection_signature() {
        Some(signature) => format!("protected by edge/CDN ({signature})"),
        None => "protected by edge/CDN".to_string(),
    };
    Verdict::up(RuleId::EdgeProtection, reason)
}

fn known_platform_matches(input: &RuleInput<'_>) -> bool {
    BOT_BLOCK_STATUSES.contains(&input.result.status)
        && input
            .signatures
            .is_bot_blocking_platform(input.target.host())
}

fn known_platform_verdict(_input: &RuleInput<'_>) -> Verdict {
    Verdict::up(RuleId::KnownPlatform, "anti-bot block on known-live platform")
}

fn parked_domain_matches(input: &RuleInput<'_>) -> bool {
    // A cut-off body is by definition not small
    !input.result.body_truncated
        && input.result.body_length < input.config.parked_max_body_size
        && input.parked_signature().is_some()
}

fn parked_domain_verdict(_input: &RuleInput<'_>) -> Verdict {
    Verdict::down(RuleId::ParkedDomain, "parked domain")
}

fn always(_input: &RuleInput<'_>) -> bool {
    true
}

fn status_default_verdict(input: &RuleInput<'_>) -> Verdict {
    let status = input.result.status;
    match status {
        100..=199 => Verdict::up(
            RuleId::StatusDefault,
            format!("informational response ({status})"),
        ),
        200..=399 => Verdict::up(RuleId::StatusDefault, format!("responded with {status}")),
        401 | 403 => Verdict::up(RuleId::StatusDefault, "requires authentication"),
        404 => Verdict::up(
            RuleId::StatusDefault,
            "page not found but server responsive",
        ),
        400..=499 => Verdict::up(RuleId::StatusDefault, "client error, server responsive"),
        _ => Verdict::down(RuleId::StatusDefault, "server error"),
    }
}

/// Runs the table against one HTTP response.
pub(crate) fn evaluate(input: &RuleInput<'_>) -> Verdict {
    for rule in RULES {
        if (rule.predicate)(input) {
            log::debug!(
                "Rule {} matched for {} (status {})",
                rule.id.as_str(),
                input.target,
                input.result.status
            );
            return (rule.verdict)(input);
        }
    }
    // The last rule always matches
    Verdict::unable_to_connect()
}

/// Verdict for an evidence sequence that holds no HTTP response.
pub(crate) fn transport_verdict(evidence: &[Evidence]) -> Verdict {
    if evidence
        .iter()
        .any(|e| matches!(e, Evidence::DnsResolved(_)))
    {
        return Verdict::up(
            RuleId::Transport,
            "domain resolves, origin unreachable but presumed protected",
        );
    }

    let failures: Vec<_> = evidence
        .iter()
        .filter_map(Evidence::as_transport_failure)
        .collect();

    if failures
        .iter()
        .any(|failure| failure.stage == ProbeStage::DnsCheck)
    {
        return Verdict::down(RuleId::Transport, "dns resolution failed");
    }

    match failures.last() {
        Some(failure) => Verdict::down(RuleId::Transport, failure.kind.as_str()),
        None => Verdict::unable_to_connect(),
    }
}

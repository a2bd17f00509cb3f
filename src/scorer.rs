//! Heuristic risk scoring

use crate::error::Result;
use crate::links::extract_links;
use crate::parser::parse_email;
use crate::rules::{
    AUTH_FAILURE_REASON, HTML_REASON, RuleSet, URGENCY_REASON, link_domain_reason,
};
use crate::types::{Analysis, ParsedEmail, Rule, ScoreResult};
use tracing::debug;

/// Score `email` with the default rule set
#[must_use]
pub fn score_email(email: &ParsedEmail) -> ScoreResult {
    RuleSet::default().score(email)
}

/// Parse raw bytes and score the result.
///
/// A parse failure is returned as is and nothing gets scored.
pub fn analyze(raw: &[u8]) -> Result<Analysis> {
    let email = parse_email(raw)?;
    let result = score_email(&email);
    Ok(Analysis { email, result })
}

impl RuleSet {
    /// Run every rule against `email`, in [`Rule::ALL`] order.
    ///
    /// Pure: the same email always yields the same result.
    #[must_use]
    pub fn score(&self, email: &ParsedEmail) -> ScoreResult {
        let mut result = ScoreResult::default();
        let auth = email.auth_results.to_lowercase();
        let text = email.body.to_lowercase();

        for rule in Rule::ALL {
            let hit = match rule {
                Rule::Authentication => self
                    .check_authentication(&auth)
                    .then(|| (self.auth_weight, AUTH_FAILURE_REASON.to_string())),
                Rule::Urgency => self
                    .check_urgency(&text)
                    .then(|| (self.urgency_weight, URGENCY_REASON.to_string())),
                Rule::LinkDomain => first_mismatched_link(&text, email.sender_domain())
                    .map(|location| (self.link_weight, link_domain_reason(&location))),
                Rule::HtmlContent => self
                    .check_html(&text)
                    .then(|| (self.html_weight, HTML_REASON.to_string())),
            };

            if let Some((weight, reason)) = hit {
                debug!("Rule {rule} triggered (+{weight}): {reason}");
                result.push(rule, weight, reason);
            }
        }

        result
    }

    fn check_authentication(&self, auth: &str) -> bool {
        self.auth_failure_markers
            .iter()
            .any(|marker| auth.contains(&marker.to_lowercase()))
    }

    fn check_urgency(&self, text: &str) -> bool {
        self.urgency_keywords
            .iter()
            .any(|word| text.contains(&word.to_lowercase()))
    }

    fn check_html(&self, text: &str) -> bool {
        text.contains(&self.html_marker.to_lowercase())
    }
}

/// Network location of the first link whose host does not contain the sender
/// domain. Links are checked in body order and the scan stops at the first
/// mismatch.
fn first_mismatched_link(text: &str, sender_domain: &str) -> Option<String> {
    extract_links(text)
        .into_iter()
        .map(|link| link.network_location)
        .find(|location| !location.is_empty() && !location.contains(sender_domain))
}

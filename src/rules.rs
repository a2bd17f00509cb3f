//! Rule weights and keyword tables

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Reason for failed sender authentication
pub const AUTH_FAILURE_REASON: &str = "Authentication checks (SPF/DKIM/DMARC) failed.";
/// Reason for pressure language in the body
pub const URGENCY_REASON: &str = "Contains high-urgency language typical of scams.";
/// Reason for an HTML document body
pub const HTML_REASON: &str = "Email is heavily HTML formatted (common in mass phishing).";

/// Reason for the link rule, naming the offending network location
#[must_use]
pub fn link_domain_reason(network_location: &str) -> String {
    format!("Suspicious link to external domain: {network_location}")
}

/// Weight of the authentication rule
pub const AUTH_FAILURE_WEIGHT: u32 = 30;
/// Weight of the urgency rule
pub const URGENCY_WEIGHT: u32 = 20;
/// Weight of the link domain rule, applied once however many links mismatch
pub const LINK_DOMAIN_WEIGHT: u32 = 20;
/// Weight of the HTML rule
pub const HTML_WEIGHT: u32 = 10;

/// Failure tokens looked for in the Authentication-Results value
pub const AUTH_FAILURE_MARKERS: [&str; 3] = ["spf=fail", "dkim=fail", "dmarc=fail"];

/// Pressure phrases, matched as plain substrings
pub const URGENCY_KEYWORDS: [&str; 5] = [
    "urgent",
    "immediately",
    "account suspended",
    "expire",
    "action required",
];

/// Opening of an `<html>` tag
pub const HTML_MARKER: &str = "<html";

/// The weight table and keyword sets the scorer runs with.
///
/// Missing fields fall back to the defaults when deserialized, so a config
/// document only has to name what it changes. Empty patterns are rejected,
/// since they would match every email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub auth_weight: u32,
    pub urgency_weight: u32,
    pub link_weight: u32,
    pub html_weight: u32,

    /// Substrings of the lower-cased Authentication-Results value
    #[serde(deserialize_with = "non_empty_patterns")]
    pub auth_failure_markers: Vec<String>,

    /// Substrings of the lower-cased body
    #[serde(deserialize_with = "non_empty_patterns")]
    pub urgency_keywords: Vec<String>,

    #[serde(deserialize_with = "non_empty_pattern")]
    pub html_marker: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            auth_weight: AUTH_FAILURE_WEIGHT,
            urgency_weight: URGENCY_WEIGHT,
            link_weight: LINK_DOMAIN_WEIGHT,
            html_weight: HTML_WEIGHT,
            auth_failure_markers: AUTH_FAILURE_MARKERS.iter().map(|s| (*s).to_string()).collect(),
            urgency_keywords: URGENCY_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
            html_marker: HTML_MARKER.to_string(),
        }
    }
}

impl RuleSet {
    /// Load a rule set from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Highest score this rule set can produce
    #[must_use]
    pub const fn max_score(&self) -> u32 {
        self.auth_weight
            .saturating_add(self.urgency_weight)
            .saturating_add(self.link_weight)
            .saturating_add(self.html_weight)
    }
}

fn non_empty_patterns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let patterns = Vec::<String>::deserialize(deserializer)?;
    if patterns.iter().any(String::is_empty) {
        return Err(D::Error::custom("patterns must not be empty strings"));
    }
    Ok(patterns)
}

fn non_empty_pattern<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let pattern = String::deserialize(deserializer)?;
    if pattern.is_empty() {
        return Err(D::Error::custom("pattern must not be an empty string"));
    }
    Ok(pattern)
}

//! Core types for parsed emails and scoring results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject used when the message carries no `Subject` header
pub const DEFAULT_SUBJECT: &str = "No Subject";

/// Sender used when the message carries no `From` header
pub const DEFAULT_FROM: &str = "Unknown Sender";

/// The normalized fields the scorer looks at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmail {
    /// Subject header, or [`DEFAULT_SUBJECT`]
    pub subject: String,

    /// Raw From header value, or [`DEFAULT_FROM`]
    pub from: String,

    /// Raw Authentication-Results header, empty if absent
    pub auth_results: String,

    /// Concatenated `text/plain` content (multipart) or the single body
    pub body: String,

    /// Every header in message order, keys as written
    pub headers: Vec<(String, String)>,
}

impl ParsedEmail {
    /// Build a record from the four scored fields, with no header list
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        from: impl Into<String>,
        auth_results: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            from: from.into(),
            auth_results: auth_results.into(),
            body: body.into(),
            headers: Vec::new(),
        }
    }

    /// First header value whose key matches `name`, ignoring case
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Domain part of the sender: text after the last `@`, `>` trimmed.
    ///
    /// Without an `@` the whole From value is returned.
    #[must_use]
    pub fn sender_domain(&self) -> &str {
        self.from
            .rsplit('@')
            .next()
            .unwrap_or_default()
            .trim_matches('>')
    }
}

/// A heuristic rule, listed in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// SPF, DKIM or DMARC reported a failure
    Authentication,
    /// Body uses pressure language
    Urgency,
    /// A link points away from the sender's domain
    LinkDomain,
    /// Body carries HTML markup
    HtmlContent,
}

impl Rule {
    /// All rules in the order they are evaluated
    pub const ALL: [Self; 4] = [
        Self::Authentication,
        Self::Urgency,
        Self::LinkDomain,
        Self::HtmlContent,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Urgency => "urgency",
            Self::LinkDomain => "link_domain",
            Self::HtmlContent => "html_content",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of scoring one email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Sum of the weights of every triggered rule (not clamped)
    pub score: u32,

    /// One reason per triggered rule, in evaluation order
    pub reasons: Vec<String>,

    /// The rules behind `reasons`, index for index
    pub triggered: Vec<Rule>,
}

impl ScoreResult {
    /// True when no rule fired
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.triggered.is_empty()
    }

    /// Did `rule` contribute to the score?
    #[must_use]
    pub fn has(&self, rule: Rule) -> bool {
        self.triggered.contains(&rule)
    }

    pub(crate) fn push(&mut self, rule: Rule, weight: u32, reason: String) {
        self.score = self.score.saturating_add(weight);
        self.reasons.push(reason);
        self.triggered.push(rule);
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Risk Score: {}/100", self.score)?;
        if self.reasons.is_empty() {
            return write!(f, "\nNo technical anomalies detected.");
        }
        for reason in &self.reasons {
            write!(f, "\n- {reason}")?;
        }
        Ok(())
    }
}

/// One full pipeline run: the parsed record and its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub email: ParsedEmail,
    pub result: ScoreResult,
}

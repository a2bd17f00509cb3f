//! URL extraction from email content

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A URL found in body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLink {
    pub url: String,
    pub network_location: String, // host[:port], userinfo included
    pub position: usize,          // byte offset in the scanned text
}

// Stops at whitespace, quotes and `>` so links inside HTML attributes end cleanly
static URL_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r#"https?://[^\s"'>]+"#).unwrap());

/// Every URL in `text`, left to right, duplicates kept
#[must_use]
pub fn extract_links(text: &str) -> Vec<ExtractedLink> {
    URL_REGEX
        .find_iter(text)
        .map(|m| ExtractedLink {
            url: m.as_str().to_string(),
            network_location: network_location(m.as_str()).to_string(),
            position: m.start(),
        })
        .collect()
}

/// Distinct URLs in `text`, in order of first appearance
#[must_use]
pub fn unique_urls(text: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for m in URL_REGEX.find_iter(text) {
        if !seen.iter().any(|u| u == m.as_str()) {
            seen.push(m.as_str().to_string());
        }
    }
    seen
}

/// The authority of a URL: everything between `://` and the first `/`, `?` or `#`.
///
/// Returns an empty string when there is no `://`.
#[must_use]
pub fn network_location(url: &str) -> &str {
    let Some((_, rest)) = url.split_once("://") else {
        return "";
    };
    rest.split(['/', '?', '#']).next().unwrap_or_default()
}

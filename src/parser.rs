//! Raw message parsing

use crate::error::{ParseError, Result};
use crate::types::{DEFAULT_FROM, DEFAULT_SUBJECT, ParsedEmail};
use regex::bytes::Regex;
use tracing::{debug, warn};

// A message opens with a header field or with the blank line closing an empty header block
static FIRST_LINE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\A(?:\r?\n|[!-9;-~]+[ \t]*:)").unwrap());

/// Parse raw email bytes into the record the scorer consumes.
///
/// Malformed input comes back as a [`ParseError`], never as a panic.
pub fn parse_email(raw: &[u8]) -> Result<ParsedEmail> {
    let email = parse_message(raw).inspect_err(|e| warn!("Rejected email: {e}"))?;

    debug!("Parsed email: {} from {}", email.subject, email.from);

    Ok(email)
}

fn parse_message(raw: &[u8]) -> Result<ParsedEmail> {
    let raw = strip_envelope_line(raw);
    check_structure(raw)?;

    let parsed = mailparse::parse_mail(raw)?;

    let headers: Vec<(String, String)> = parsed
        .headers
        .iter()
        .map(|h| (h.get_key(), h.get_value()))
        .collect();

    let subject = find_header(&parsed.headers, "subject").unwrap_or_else(|| DEFAULT_SUBJECT.into());
    let from = find_header(&parsed.headers, "from").unwrap_or_else(|| DEFAULT_FROM.into());
    let auth_results = find_header(&parsed.headers, "authentication-results").unwrap_or_default();
    let body = extract_body(&parsed)?;

    Ok(ParsedEmail {
        subject,
        from,
        auth_results,
        body,
        headers,
    })
}

/// Drop a leading mbox `From ` separator line if present
fn strip_envelope_line(raw: &[u8]) -> &[u8] {
    if !raw.starts_with(b"From ") {
        return raw;
    }
    raw.iter()
        .position(|&b| b == b'\n')
        .map_or(&raw[raw.len()..], |nl| &raw[nl + 1..])
}

fn check_structure(raw: &[u8]) -> Result<()> {
    if raw.is_empty() {
        return Err(ParseError::Structure("message is empty".into()));
    }
    if !FIRST_LINE_REGEX.is_match(raw) {
        return Err(ParseError::Structure(
            "input does not start with a header field".into(),
        ));
    }
    Ok(())
}

fn find_header(headers: &[mailparse::MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().to_lowercase() == name)
        .map(mailparse::MailHeader::get_value)
}

fn extract_body(parsed: &mailparse::ParsedMail) -> Result<String> {
    if is_multipart(parsed) {
        let mut text = String::new();
        collect_plain_text(parsed, &mut text)?;
        Ok(text)
    } else {
        // Single part content is taken whatever its declared type
        decode_part(parsed)
    }
}

fn collect_plain_text(parsed: &mailparse::ParsedMail, text: &mut String) -> Result<()> {
    for part in &parsed.subparts {
        collect_part(part, text)?;
    }
    Ok(())
}

fn collect_part(part: &mailparse::ParsedMail, text: &mut String) -> Result<()> {
    let mimetype = part.ctype.mimetype.to_lowercase();

    if is_multipart(part) {
        collect_plain_text(part, text)?;
    } else if mimetype == "message/rfc822" {
        // Attached messages are walked like any other part
        let raw = part
            .get_body_raw()
            .map_err(|e| ParseError::Decode(e.to_string()))?;
        let inner = mailparse::parse_mail(&raw)?;
        collect_part(&inner, text)?;
    } else if mimetype == "text/plain" {
        text.push_str(&decode_part(part)?);
    }
    Ok(())
}

fn is_multipart(parsed: &mailparse::ParsedMail) -> bool {
    parsed.ctype.mimetype.to_lowercase().starts_with("multipart/")
}

fn decode_part(part: &mailparse::ParsedMail) -> Result<String> {
    part.get_body().map_err(|e| ParseError::Decode(e.to_string()))
}

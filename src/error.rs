//! Error types for email parsing

use thiserror::Error;

/// Errors that can occur while turning raw bytes into a [`crate::ParsedEmail`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input is not shaped like an email message
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// A body part could not be decoded
    #[error("Failed to decode content: {0}")]
    Decode(String),
}

impl From<mailparse::MailParseError> for ParseError {
    fn from(err: mailparse::MailParseError) -> Self {
        Self::Structure(err.to_string())
    }
}

/// Result type for email parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;

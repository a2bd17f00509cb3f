// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Phishing Inspector
//!
//! Parses a raw email message and produces a bounded technical risk score
//! together with the human-readable red flags that raised it.
//!
//! # Pipeline
//!
//! - [`parse_email`] turns raw MIME bytes into a [`ParsedEmail`]
//! - [`score_email`] (or [`RuleSet::score`]) runs the heuristic rules
//! - [`analyze`] does both and stops on a parse failure
//!
//! # Example
//!
//! ```rust
//! use phish_inspect::{parse_email, score_email};
//!
//! let raw = b"From: alerts@bank.com\r\n\
//!             Subject: Notice\r\n\
//!             Authentication-Results: mx.example.net; spf=fail\r\n\
//!             \r\n\
//!             Your account suspended, visit http://bank-login.evil/reset";
//! let email = parse_email(raw).unwrap();
//! let result = score_email(&email);
//!
//! assert_eq!(result.score, 70);
//! println!("{result}");
//! ```

mod error;
mod links;
mod parser;
mod rules;
mod scorer;
mod types;

pub use error::{ParseError, Result};
pub use links::{ExtractedLink, extract_links, network_location, unique_urls};
pub use parser::parse_email;
pub use rules::*;
pub use scorer::{analyze, score_email};
pub use types::*;

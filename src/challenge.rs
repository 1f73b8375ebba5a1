//! Parser for the authorization-discovery challenge header
//!
//! A RadioTAG service announces its authorization provider through a
//! `WWW-Authenticate`-style header shaped as a sequence of `key="value"`
//! pairs, e.g.:
//!
//! ```text
//! CPA version="1.0" name="Example AP" uri="https://ap.example.com" modes="client,user"
//! ```
//!
//! The parser walks the header with an explicit tokenizer rather than a
//! repeated regex match, so duplicate-key and malformed-quote handling stay
//! visible: pairs are comma- or space-separated, bare words (the scheme
//! token) are skipped, and the last occurrence of a repeated key wins.

use crate::error::{Error, Result};
use crate::models::{AuthProvider, Modes};
use std::collections::HashMap;

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Tokenize a challenge header into its `key="value"` pairs
///
/// Values may contain any character; a double quote inside a value must be
/// backslash-escaped. An unterminated value or an unquoted `key=` form is a
/// malformed challenge.
fn parse_pairs(challenge: &str) -> Result<HashMap<String, String>> {
    let mut pairs = HashMap::new();
    let mut chars = challenge.chars().peekable();

    while let Some(&next) = chars.peek() {
        if is_separator(next) {
            chars.next();
            continue;
        }

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if !is_key_char(c) {
                break;
            }
            key.push(c);
            chars.next();
        }

        if key.is_empty() {
            return Err(Error::malformed_challenge(format!(
                "unexpected character {:?}",
                next
            )));
        }

        if chars.peek() != Some(&'=') {
            // Bare word, e.g. the auth scheme token. Not a pair.
            continue;
        }
        chars.next();

        if chars.next() != Some('"') {
            return Err(Error::malformed_challenge(format!(
                "expected quoted value for key \"{}\"",
                key
            )));
        }

        let mut value = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    closed = true;
                    break;
                }
                '\\' => match chars.next() {
                    Some(escaped) => value.push(escaped),
                    None => break,
                },
                _ => value.push(c),
            }
        }
        if !closed {
            return Err(Error::malformed_challenge(format!(
                "unterminated value for key \"{}\"",
                key
            )));
        }

        // Last occurrence of a repeated key wins.
        pairs.insert(key, value);
    }

    Ok(pairs)
}

/// Parse a discovery challenge header into authorization-provider info
///
/// Requires a `uri` attribute (the provider's base URL, trailing slash
/// appended if absent) and a `modes` attribute (comma-separated token list).
/// Mode tokens are matched exactly; unknown tokens are silently dropped for
/// forward compatibility. The `anonymous` mode is never asserted in this
/// protocol version.
///
/// # Errors
///
/// [`Error::MissingUri`] when the `uri` attribute is absent, and
/// [`Error::MalformedChallenge`] when the `modes` attribute is absent or the
/// header does not tokenize. A provider that omits `modes` is violating the
/// protocol, which is distinct from announcing no modes at all.
pub fn parse_challenge(challenge: &str) -> Result<AuthProvider> {
    let pairs = parse_pairs(challenge)?;

    let uri = pairs.get("uri").ok_or(Error::MissingUri)?;
    let modes_value = pairs
        .get("modes")
        .ok_or_else(|| Error::malformed_challenge("missing \"modes\" attribute"))?;

    let base_url = if uri.ends_with('/') {
        uri.clone()
    } else {
        format!("{}/", uri)
    };

    let tokens: Vec<&str> = modes_value.split(',').collect();
    let modes = Modes {
        client: tokens.contains(&"client"),
        user: tokens.contains(&"user"),
        anonymous: false,
    };

    Ok(AuthProvider { base_url, modes })
}

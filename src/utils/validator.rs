//! # Text Input Validation Utilities
//!
//! This module normalizes and validates the free-text client name carried by
//! every status check.
//!
//! The accepted alphabet is deliberately narrow: ASCII word characters,
//! whitespace, `-`, `.`, `,` and the Cyrillic block (U+0400..=U+04FF).
//! Other scripts (accented Latin, CJK, emoji, ...) are rejected.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::utils::constant::MAX_CLIENT_NAME_LENGTH;

/// Client name character rule.
///
/// # Examples
///
/// - `Acme Corp.` ✓ Valid
/// - `Иван Петров` ✓ Valid
/// - `Zoë` ✗ Invalid (accented Latin)
/// - `shop 🚀` ✗ Invalid (emoji)
pub static CLIENT_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_\s\-.,\x{0400}-\x{04FF}]+$")
        .expect("Failed to compile client name regex")
});

fn client_name_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn too_long() -> ValidationError {
    client_name_error(
        "too_long",
        format!("Client name must be at most {MAX_CLIENT_NAME_LENGTH} characters"),
    )
}

/// Trims a raw client name and checks it against the length and
/// character rules.
///
/// Length is counted in characters, not bytes, so a 200-letter Cyrillic
/// name is accepted. The bound applies to the raw input as well as to the
/// trimmed result, so padding cannot smuggle an over-long value through.
///
/// # Returns
///
/// * `Ok(String)` with the trimmed name
/// * `Err(ValidationError)` describing the first rule that failed
pub fn normalize_client_name(raw: &str) -> Result<String, ValidationError> {
    if raw.chars().count() as u64 > MAX_CLIENT_NAME_LENGTH {
        return Err(too_long());
    }

    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(client_name_error("empty", "Client name cannot be empty"));
    }

    if trimmed.chars().count() as u64 > MAX_CLIENT_NAME_LENGTH {
        return Err(too_long());
    }

    if !CLIENT_NAME_REGEX.is_match(trimmed) {
        return Err(client_name_error(
            "invalid_characters",
            "Client name contains invalid characters",
        ));
    }

    Ok(trimmed.to_string())
}

/// `validator` custom rule wrapping [`normalize_client_name`].
pub fn validate_client_name(raw: &str) -> Result<(), ValidationError> {
    normalize_client_name(raw).map(|_| ())
}

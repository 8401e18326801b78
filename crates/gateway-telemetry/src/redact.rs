//! Secret redaction for log output.
//!
//! Upstream bodies and error strings are logged on failure. Anything that
//! looks like a credential is masked before it reaches a log line.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Replacement text for masked values
pub const REDACTED: &str = "[REDACTED]";

/// Longest body excerpt written to a log line, in characters
pub const MAX_LOGGED_BODY_CHARS: usize = 2048;

static QUERY_KEY_REGEX: Lazy<Regex> = Lazy::new(|| {
    // key=... and api_key=... as they appear in URLs
    Regex::new(r#"(?i)\b((?:api_)?key=)[^&\s"']+"#).unwrap()
});

static BEARER_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Bearer\s+)[A-Za-z0-9._~+/=-]+").unwrap()
});

static SK_KEY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bsk-[A-Za-z0-9_-]{8,}").unwrap()
});

/// Mask credential-looking substrings
#[must_use]
pub fn redact_secrets(text: &str) -> Cow<'_, str> {
    let patterns = [&*QUERY_KEY_REGEX, &*BEARER_TOKEN_REGEX, &*SK_KEY_REGEX];
    if !patterns.iter().any(|re| re.is_match(text)) {
        return Cow::Borrowed(text);
    }

    let out = QUERY_KEY_REGEX.replace_all(text, "${1}[REDACTED]").into_owned();
    let out = BEARER_TOKEN_REGEX.replace_all(&out, "${1}[REDACTED]").into_owned();
    let out = SK_KEY_REGEX.replace_all(&out, REDACTED).into_owned();
    Cow::Owned(out)
}

/// Render a raw body for logging: lossy UTF-8, truncated, redacted
#[must_use]
pub fn redact_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let excerpt: String = text.chars().take(MAX_LOGGED_BODY_CHARS).collect();
    let truncated = text.chars().nth(MAX_LOGGED_BODY_CHARS).is_some();

    let mut out = redact_secrets(&excerpt).into_owned();
    if truncated {
        out.push_str("...[truncated]");
    }
    out
}

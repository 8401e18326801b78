//! Gateway error taxonomy.
//!
//! Every failure path ends in exactly one [`GatewayError`]. The `Display`
//! output carries operator-facing detail for logs; callers only ever see
//! [`GatewayError::public_message`].

use crate::types::ProviderKind;
use std::fmt;

/// Result alias used across the gateway
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Inbound request failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong
        message: String,
        /// Offending field, when known
        field: Option<String>,
    },

    /// A provider credential was not available at request time
    #[error("Missing credential for provider {provider}")]
    MissingCredential {
        /// Provider whose key is missing
        provider: ProviderKind,
    },

    /// The provider refused the prompt
    #[error("Content blocked: {reason}")]
    ContentBlocked {
        /// Humanized block reason
        reason: String,
    },

    /// The upstream call failed or returned a non-2xx status
    #[error("Upstream transport error from {provider}: {message}")]
    UpstreamTransport {
        /// Provider that was called
        provider: ProviderKind,
        /// HTTP status, if a response was received
        status: Option<u16>,
        /// Transport detail (never contains credentials)
        message: String,
    },

    /// The upstream reply lacked the keys needed to normalize it
    #[error("Upstream format error from {provider}: {issue}")]
    UpstreamFormat {
        /// Provider that replied
        provider: ProviderKind,
        /// What was wrong with the payload
        issue: FormatIssue,
    },

    /// Anything unanticipated
    #[error("Internal error: {message}")]
    Internal {
        /// Detail for the operational log
        message: String,
    },
}

/// Reason an upstream payload could not be normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatIssue {
    /// Gemini returned no candidates
    NoCandidates,
    /// A chat-completions provider returned no choices
    NoChoices,
    /// The payload was not the expected JSON shape
    Malformed(String),
}

impl fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidates => f.write_str("no candidates"),
            Self::NoChoices => f.write_str("no choices"),
            Self::Malformed(detail) => write!(f, "malformed payload: {detail}"),
        }
    }
}

/// Discriminant of [`GatewayError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`GatewayError::Validation`]
    Validation,
    /// See [`GatewayError::MissingCredential`]
    MissingCredential,
    /// See [`GatewayError::ContentBlocked`]
    ContentBlocked,
    /// See [`GatewayError::UpstreamTransport`]
    UpstreamTransport,
    /// See [`GatewayError::UpstreamFormat`]
    UpstreamFormat,
    /// See [`GatewayError::Internal`]
    Internal,
}

impl ErrorKind {
    /// Stable snake_case name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::MissingCredential => "missing_credential",
            Self::ContentBlocked => "content_blocked",
            Self::UpstreamTransport => "upstream_transport",
            Self::UpstreamFormat => "upstream_format",
            Self::Internal => "internal",
        }
    }
}

/// Externally visible status classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The caller sent something unusable
    ClientError,
    /// The gateway is misconfigured
    ServerConfiguration,
    /// The upstream provider failed
    UpstreamFailure,
    /// The gateway failed internally
    Internal,
}

impl ErrorClass {
    /// Error type string exposed in the response body
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientError => "invalid_request_error",
            Self::ServerConfiguration => "configuration_error",
            Self::UpstreamFailure => "upstream_error",
            Self::Internal => "internal_error",
        }
    }

    /// HTTP status code for this class
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ClientError => 400,
            Self::ServerConfiguration | Self::Internal => 500,
            Self::UpstreamFailure => 502,
        }
    }
}

impl GatewayError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>, field: Option<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field,
        }
    }

    /// Create a content-blocked error from a raw provider block reason
    pub fn content_blocked(raw_reason: &str) -> Self {
        Self::ContentBlocked {
            reason: humanize_block_reason(raw_reason),
        }
    }

    /// Create an upstream transport error
    pub fn upstream_transport(
        provider: ProviderKind,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::UpstreamTransport {
            provider,
            status,
            message: message.into(),
        }
    }

    /// Create an upstream format error
    pub fn upstream_format(provider: ProviderKind, issue: FormatIssue) -> Self {
        Self::UpstreamFormat { provider, issue }
    }

    /// Create a malformed-payload format error
    pub fn malformed(provider: ProviderKind, detail: impl Into<String>) -> Self {
        Self::UpstreamFormat {
            provider,
            issue: FormatIssue::Malformed(detail.into()),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Error discriminant
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::MissingCredential { .. } => ErrorKind::MissingCredential,
            Self::ContentBlocked { .. } => ErrorKind::ContentBlocked,
            Self::UpstreamTransport { .. } => ErrorKind::UpstreamTransport,
            Self::UpstreamFormat { .. } => ErrorKind::UpstreamFormat,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Status classification
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::ContentBlocked => ErrorClass::ClientError,
            ErrorKind::MissingCredential => ErrorClass::ServerConfiguration,
            ErrorKind::UpstreamTransport => ErrorClass::UpstreamFailure,
            ErrorKind::UpstreamFormat | ErrorKind::Internal => ErrorClass::Internal,
        }
    }

    /// HTTP status code
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.class().status_code()
    }

    /// Check if error is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.class() == ErrorClass::ClientError
    }

    /// Message safe to return to the caller.
    ///
    /// Validation and content-block messages are user-actionable. Everything
    /// else is generic; the detail stays in the log.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::ContentBlocked { reason } => format!("Content blocked: {reason}"),
            Self::MissingCredential { .. } => "Provider credentials are not configured".to_string(),
            Self::UpstreamTransport { .. } => "Model API request failed".to_string(),
            Self::UpstreamFormat { issue, .. } => match issue {
                FormatIssue::NoCandidates | FormatIssue::NoChoices => {
                    "No response generated".to_string()
                }
                FormatIssue::Malformed(_) => "Invalid API response format".to_string(),
            },
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }
}

/// Turn a provider block code such as `BLOCK_REASON_UNSPECIFIED` into
/// `Block Reason Unspecified`.
///
/// A letter is upper-cased when it starts a run of letters and lower-cased
/// otherwise, so `SAFETY` becomes `Safety`.
#[must_use]
pub fn humanize_block_reason(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_alpha = false;
    for c in raw.replace('_', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_block_reason() {
        assert_eq!(humanize_block_reason("SAFETY"), "Safety");
        assert_eq!(humanize_block_reason("OTHER"), "Other");
        assert_eq!(
            humanize_block_reason("BLOCK_REASON_UNSPECIFIED"),
            "Block Reason Unspecified"
        );
        assert_eq!(humanize_block_reason("PROHIBITED_CONTENT"), "Prohibited Content");
    }

    #[test]
    fn test_content_blocked_public_message() {
        let err = GatewayError::content_blocked("SAFETY");
        assert_eq!(err.kind(), ErrorKind::ContentBlocked);
        assert_eq!(err.public_message(), "Content blocked: Safety");
        assert_eq!(err.to_string(), "Content blocked: Safety");
    }

    #[test]
    fn test_classification() {
        let cases = [
            (GatewayError::validation("bad", None), ErrorClass::ClientError, 400),
            (GatewayError::content_blocked("SAFETY"), ErrorClass::ClientError, 400),
            (
                GatewayError::MissingCredential {
                    provider: ProviderKind::OpenAI,
                },
                ErrorClass::ServerConfiguration,
                500,
            ),
            (
                GatewayError::upstream_transport(ProviderKind::Gemini, Some(503), "HTTP 503"),
                ErrorClass::UpstreamFailure,
                502,
            ),
            (
                GatewayError::upstream_format(ProviderKind::Gemini, FormatIssue::NoCandidates),
                ErrorClass::Internal,
                500,
            ),
            (GatewayError::internal("boom"), ErrorClass::Internal, 500),
        ];

        for (err, class, status) in cases {
            assert_eq!(err.class(), class, "{err}");
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn test_public_messages_do_not_leak() {
        let err = GatewayError::upstream_transport(
            ProviderKind::DeepSeek,
            Some(401),
            "HTTP 401: {\"error\":\"invalid key sk-abc\"}",
        );
        assert_eq!(err.public_message(), "Model API request failed");

        let err = GatewayError::MissingCredential {
            provider: ProviderKind::DeepSeek,
        };
        let public = err.public_message();
        assert!(!public.contains("DEEPSEEK"));
        assert!(!public.contains("deepseek"));

        let err = GatewayError::malformed(ProviderKind::OpenAI, "missing field `message`");
        assert_eq!(err.public_message(), "Invalid API response format");

        let err = GatewayError::internal("stack trace here");
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_format_issue_display() {
        assert_eq!(FormatIssue::NoCandidates.to_string(), "no candidates");
        assert_eq!(FormatIssue::NoChoices.to_string(), "no choices");
        let err = GatewayError::upstream_format(ProviderKind::OpenAI, FormatIssue::NoChoices);
        assert_eq!(err.public_message(), "No response generated");
    }
}

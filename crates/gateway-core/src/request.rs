//! Inbound request types.
//!
//! [`GenerateRequest`] is the raw body accepted by the API. Calling
//! [`GenerateRequest::validate`] produces an immutable [`UnifiedRequest`],
//! the only request shape provider adapters ever see.

use crate::error::GatewayError;
use crate::types::{ModelKind, Temperature, TopP};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Default temperature and top_p when the caller omits them
pub const DEFAULT_SAMPLING: f64 = 0.1;

fn default_sampling() -> f64 {
    DEFAULT_SAMPLING
}

/// Raw generation request as received from the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    /// User prompt
    pub message: String,

    /// Target model; unknown identifiers fail deserialization
    #[serde(default)]
    pub model: ModelKind,

    /// Sampling temperature
    #[serde(default = "default_sampling")]
    #[validate(range(min = 0.0, max = 1.0, message = "temperature must be between 0.0 and 1.0"))]
    pub temperature: f64,

    /// Nucleus sampling parameter
    #[serde(default = "default_sampling")]
    #[validate(range(min = 0.0, max = 1.0, message = "top_p must be between 0.0 and 1.0"))]
    pub top_p: f64,
}

impl GenerateRequest {
    /// Create a request with default sampling parameters
    #[must_use]
    pub fn new(message: impl Into<String>, model: ModelKind) -> Self {
        Self {
            message: message.into(),
            model,
            temperature: DEFAULT_SAMPLING,
            top_p: DEFAULT_SAMPLING,
        }
    }

    /// Set the temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set top_p
    #[must_use]
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    /// Validate and normalize into a [`UnifiedRequest`].
    ///
    /// The message is checked first, so a blank message fails regardless of
    /// the other fields.
    ///
    /// # Errors
    /// Returns [`GatewayError::Validation`] on a blank message or an
    /// out-of-range sampling parameter
    pub fn validate(&self) -> Result<UnifiedRequest, GatewayError> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(GatewayError::validation(
                "Message cannot be empty",
                Some("message".to_string()),
            ));
        }

        Validate::validate(self).map_err(|e| from_validation_errors(&e))?;

        Ok(UnifiedRequest {
            message: message.to_string(),
            model: self.model,
            temperature: Temperature::new(self.temperature)?,
            top_p: TopP::new(self.top_p)?,
        })
    }
}

fn from_validation_errors(errors: &ValidationErrors) -> GatewayError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let field = field.to_string();
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
                (field, message)
            })
        })
        .collect();
    fields.sort();

    match fields.into_iter().next() {
        Some((field, message)) => GatewayError::validation(message, Some(field)),
        None => GatewayError::validation("Invalid request", None),
    }
}

/// Validated, provider-agnostic generation request
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedRequest {
    message: String,
    model: ModelKind,
    temperature: Temperature,
    top_p: TopP,
}

impl UnifiedRequest {
    /// Trimmed, non-empty prompt
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Target model
    #[must_use]
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Sampling temperature
    #[must_use]
    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Nucleus sampling parameter
    #[must_use]
    pub fn top_p(&self) -> TopP {
        self.top_p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults_applied() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{"message": "hi"}"#).expect("deserialize");
        assert_eq!(request.model, ModelKind::GeminiFlash);
        assert!((request.temperature - 0.1).abs() < f64::EPSILON);
        assert!((request.top_p - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_trims_message() {
        let unified = GenerateRequest::new("  hello there \n", ModelKind::DeepSeek)
            .validate()
            .expect("valid");
        assert_eq!(unified.message(), "hello there");
        assert_eq!(unified.model(), ModelKind::DeepSeek);
    }

    #[test]
    fn test_blank_message_rejected() {
        for message in ["", "   ", "\n\t  "] {
            let err = GenerateRequest::new(message, ModelKind::GeminiFlash)
                .validate()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.public_message(), "Message cannot be empty");
        }
    }

    #[test]
    fn test_blank_message_wins_over_bad_ranges() {
        let err = GenerateRequest::new(" ", ModelKind::Gpt4oMini)
            .with_temperature(5.0)
            .with_top_p(-1.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.public_message(), "Message cannot be empty");
    }

    #[test]
    fn test_temperature_out_of_range() {
        for temperature in [-0.1, 1.5] {
            let err = GenerateRequest::new("hi", ModelKind::GeminiFlash)
                .with_temperature(temperature)
                .validate()
                .unwrap_err();
            match err {
                GatewayError::Validation { field, message } => {
                    assert_eq!(field.as_deref(), Some("temperature"));
                    assert!(message.contains("temperature"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_top_p_out_of_range() {
        let err = GenerateRequest::new("hi", ModelKind::DeepSeek)
            .with_top_p(1.0001)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Validation { field: Some(ref f), .. } if f == "top_p"
        ));
    }

    #[test]
    fn test_bounds_inclusive() {
        let unified = GenerateRequest::new("hi", ModelKind::Gpt4oMini)
            .with_temperature(0.0)
            .with_top_p(1.0)
            .validate()
            .expect("inclusive bounds are valid");
        assert!(unified.temperature().value().abs() < f64::EPSILON);
        assert!((unified.top_p().value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_model_fails_deserialization() {
        let result =
            serde_json::from_str::<GenerateRequest>(r#"{"message": "hi", "model": "claude-3"}"#);
        assert!(result.is_err());
    }
}

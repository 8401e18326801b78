//! Response types for the gateway.

use serde::{Deserialize, Serialize};

/// Text produced by a provider after normalization.
///
/// Never absent: when a provider produced nothing usable the adapter fills in
/// its fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    /// Normalized text
    pub text: String,
}

impl NormalizedResult {
    /// Create a result
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Success envelope returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Always `"success"`
    pub status: String,
    /// Payload
    pub data: ResponseData,
}

/// Payload of [`GenerateResponse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    /// Normalized model output
    pub message: String,
}

impl From<NormalizedResult> for GenerateResponse {
    fn from(result: NormalizedResult) -> Self {
        Self {
            status: "success".to_string(),
            data: ResponseData {
                message: result.text,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let response = GenerateResponse::from(NormalizedResult::new("Hello"));
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "data": {"message": "Hello"}})
        );
    }
}

//! Provider adapter abstraction.

use crate::error::GatewayResult;
use crate::request::UnifiedRequest;
use crate::response::NormalizedResult;
use crate::types::{ApiKey, ProviderKind};
use crate::wire::ProviderWireRequest;

/// Translates between the unified request/result and one provider's wire
/// contract.
///
/// Both operations are pure: no I/O, no hidden state. Calling
/// `parse_response` twice on the same bytes yields the same outcome.
pub trait ProviderAdapter: Send + Sync {
    /// Provider served by this adapter
    fn provider(&self) -> ProviderKind;

    /// Build the provider-specific HTTP request
    fn build_request(&self, request: &UnifiedRequest, credential: &ApiKey) -> ProviderWireRequest;

    /// Normalize a successful (2xx) provider reply
    ///
    /// # Errors
    /// Returns `ContentBlocked` or `UpstreamFormat` when the payload cannot be
    /// turned into text
    fn parse_response(&self, body: &[u8]) -> GatewayResult<NormalizedResult>;
}

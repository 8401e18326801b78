//! Provider credential store.
//!
//! Populated once at startup and read-only afterwards, so it can be shared
//! behind an `Arc` by every request without locking.

use crate::error::ConfigError;
use gateway_core::{ApiKey, GatewayError, GatewayResult, ProviderKind};
use std::collections::HashMap;
use tracing::info;

/// Read-only mapping from provider to API key
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    keys: HashMap<ProviderKind, ApiKey>,
}

impl CredentialStore {
    /// Load every provider key from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingCredentials`] naming every provider whose
    /// key is absent or empty. The process must not start serving in that case.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load every provider key through a custom variable lookup
    ///
    /// # Errors
    /// Same as [`CredentialStore::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut keys = HashMap::new();
        let mut missing = Vec::new();

        for provider in ProviderKind::ALL {
            match lookup(provider.credential_env()).filter(|v| !v.trim().is_empty()) {
                Some(value) => {
                    keys.insert(provider, ApiKey::new(value.trim()));
                }
                None => missing.push(provider.credential_name().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ConfigError::MissingCredentials(missing));
        }

        info!(providers = keys.len(), "Provider credentials loaded");
        Ok(Self { keys })
    }

    /// Build a store from explicit entries without the completeness check.
    ///
    /// Lookups for providers left out fail with `MissingCredential`.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ProviderKind, S)>,
        S: Into<String>,
    {
        Self {
            keys: entries
                .into_iter()
                .map(|(provider, key)| (provider, ApiKey::new(key)))
                .collect(),
        }
    }

    /// Credential for a provider
    ///
    /// # Errors
    /// Returns [`GatewayError::MissingCredential`] if the store was built
    /// without this provider
    pub fn lookup(&self, provider: ProviderKind) -> GatewayResult<&ApiKey> {
        self.keys
            .get(&provider)
            .ok_or(GatewayError::MissingCredential { provider })
    }

    /// Whether every provider has a key
    #[must_use]
    pub fn is_complete(&self) -> bool {
        ProviderKind::ALL.iter().all(|p| self.keys.contains_key(p))
    }
}

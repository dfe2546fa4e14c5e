//! Configuration types for the Cosmos DB client.
//!
//! # Overview
//!
//! - [`CosmosConfig`]: The configuration struct holding all client settings
//! - [`CosmosConfigBuilder`]: A builder for constructing [`CosmosConfig`] instances
//! - [`DatabaseAccount`]: A validated account name
//! - [`MasterKey`]: A decoded master key with masked debug output
//! - [`Endpoint`]: A validated endpoint override
//! - [`ApiVersion`]: The REST API version to send
//!
//! # Example
//!
//! ```rust
//! use cosmosdb::{CosmosConfig, DatabaseAccount, MasterKey};
//!
//! let config = CosmosConfig::builder()
//!     .account(DatabaseAccount::new("my-account").unwrap())
//!     .master_key(MasterKey::new("c2VjcmV0").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint(), "https://my-account.documents.azure.com");
//! ```

mod newtypes;
mod version;

use std::time::Duration;

pub use newtypes::{DatabaseAccount, Endpoint, MasterKey};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Wait applied to a throttled request whose response carries no hint.
pub const DEFAULT_THROTTLE_FALLBACK_WAIT: Duration = Duration::from_millis(100);

/// Configuration for the Cosmos DB client.
///
/// # Thread Safety
///
/// `CosmosConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct CosmosConfig {
    account: DatabaseAccount,
    master_key: MasterKey,
    endpoint: Option<Endpoint>,
    api_version: ApiVersion,
    user_agent_prefix: Option<String>,
    throttle_fallback_wait: Duration,
    max_throttle_retries: Option<u32>,
    operation_timeout: Option<Duration>,
}

impl CosmosConfig {
    /// Creates a new builder for constructing a `CosmosConfig`.
    #[must_use]
    pub fn builder() -> CosmosConfigBuilder {
        CosmosConfigBuilder::new()
    }

    /// Returns the database account.
    #[must_use]
    pub const fn account(&self) -> &DatabaseAccount {
        &self.account
    }

    /// Returns the decoded master key.
    #[must_use]
    pub const fn master_key(&self) -> &MasterKey {
        &self.master_key
    }

    /// Returns the endpoint requests are sent to.
    ///
    /// This is the configured override, or the account's public endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.endpoint.as_ref().map_or_else(
            || self.account.default_endpoint(),
            |endpoint| endpoint.as_ref().to_string(),
        )
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the wait used for throttled responses without a retry hint.
    #[must_use]
    pub const fn throttle_fallback_wait(&self) -> Duration {
        self.throttle_fallback_wait
    }

    /// Returns the cap on throttle retries, `None` meaning unbounded.
    #[must_use]
    pub const fn max_throttle_retries(&self) -> Option<u32> {
        self.max_throttle_retries
    }

    /// Returns the default time budget of one logical operation.
    #[must_use]
    pub const fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout
    }
}

// Verify CosmosConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CosmosConfig>();
};

/// Builder for constructing [`CosmosConfig`] instances.
///
/// Required fields are `account` and `master_key`.
///
/// # Defaults
///
/// - `endpoint`: `https://{account}.documents.azure.com`
/// - `api_version`: [`ApiVersion::latest`]
/// - `user_agent_prefix`: `None`
/// - `throttle_fallback_wait`: [`DEFAULT_THROTTLE_FALLBACK_WAIT`]
/// - `max_throttle_retries`: `None` (unbounded)
/// - `operation_timeout`: `None`
#[derive(Debug, Default)]
pub struct CosmosConfigBuilder {
    account: Option<DatabaseAccount>,
    master_key: Option<MasterKey>,
    endpoint: Option<Endpoint>,
    api_version: Option<ApiVersion>,
    user_agent_prefix: Option<String>,
    throttle_fallback_wait: Option<Duration>,
    max_throttle_retries: Option<u32>,
    operation_timeout: Option<Duration>,
}

impl CosmosConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the database account (required).
    #[must_use]
    pub fn account(mut self, account: DatabaseAccount) -> Self {
        self.account = Some(account);
        self
    }

    /// Sets the master key (required).
    #[must_use]
    pub fn master_key(mut self, key: MasterKey) -> Self {
        self.master_key = Some(key);
        self
    }

    /// Overrides the endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the wait used when a throttled response carries no retry hint.
    #[must_use]
    pub const fn throttle_fallback_wait(mut self, wait: Duration) -> Self {
        self.throttle_fallback_wait = Some(wait);
        self
    }

    /// Caps how many times a throttled request is re-issued.
    #[must_use]
    pub const fn max_throttle_retries(mut self, retries: u32) -> Self {
        self.max_throttle_retries = Some(retries);
        self
    }

    /// Sets the default time budget of one logical operation, retries included.
    #[must_use]
    pub const fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Builds the [`CosmosConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `account` or
    /// `master_key` are not set.
    pub fn build(self) -> Result<CosmosConfig, ConfigError> {
        let account = self
            .account
            .ok_or(ConfigError::MissingRequiredField { field: "account" })?;
        let master_key = self
            .master_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "master_key",
            })?;

        Ok(CosmosConfig {
            account,
            master_key,
            endpoint: self.endpoint,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            user_agent_prefix: self.user_agent_prefix,
            throttle_fallback_wait: self
                .throttle_fallback_wait
                .unwrap_or(DEFAULT_THROTTLE_FALLBACK_WAIT),
            max_throttle_retries: self.max_throttle_retries,
            operation_timeout: self.operation_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> DatabaseAccount {
        DatabaseAccount::new("testaccount").unwrap()
    }

    fn key() -> MasterKey {
        MasterKey::new("c2VjcmV0").unwrap()
    }

    #[test]
    fn test_builder_requires_account() {
        let result = CosmosConfigBuilder::new().master_key(key()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "account" })
        ));
    }

    #[test]
    fn test_builder_requires_master_key() {
        let result = CosmosConfigBuilder::new().account(account()).build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "master_key"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = CosmosConfig::builder()
            .account(account())
            .master_key(key())
            .build()
            .unwrap();

        assert_eq!(config.endpoint(), "https://testaccount.documents.azure.com");
        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert_eq!(
            config.throttle_fallback_wait(),
            DEFAULT_THROTTLE_FALLBACK_WAIT
        );
        assert!(config.max_throttle_retries().is_none());
        assert!(config.operation_timeout().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = CosmosConfig::builder()
            .account(account())
            .master_key(key())
            .endpoint(Endpoint::new("https://localhost:8081").unwrap())
            .api_version(ApiVersion::V2018_06_18)
            .user_agent_prefix("MyApp/1.0")
            .throttle_fallback_wait(Duration::from_millis(5))
            .max_throttle_retries(3)
            .operation_timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        assert_eq!(config.endpoint(), "https://localhost:8081");
        assert_eq!(config.api_version(), &ApiVersion::V2018_06_18);
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.throttle_fallback_wait(), Duration::from_millis(5));
        assert_eq!(config.max_throttle_retries(), Some(3));
        assert_eq!(config.operation_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_debug_does_not_leak_key() {
        let config = CosmosConfig::builder()
            .account(account())
            .master_key(key())
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("CosmosConfig"));
        assert!(!debug_str.contains("c2VjcmV0"));
        assert!(debug_str.contains("MasterKey(*****)"));
    }
}

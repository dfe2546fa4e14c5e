//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around account credentials and
//! endpoint URLs that validate their contents on construction. Invalid values
//! are rejected with clear error messages.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::ConfigError;

/// A validated Cosmos DB database account name.
///
/// The account name is the first label of the account's host name
/// (`{account}.documents.azure.com`).
///
/// # Example
///
/// ```rust
/// use cosmosdb::DatabaseAccount;
///
/// let account = DatabaseAccount::new("my-account").unwrap();
/// assert_eq!(account.as_ref(), "my-account");
/// assert_eq!(account.default_endpoint(), "https://my-account.documents.azure.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatabaseAccount(String);

impl DatabaseAccount {
    const HOST_SUFFIX: &'static str = ".documents.azure.com";

    /// Creates a new validated account name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccount`] if the name is empty and
    /// [`ConfigError::InvalidAccount`] if it contains characters other than
    /// lowercase letters, digits and hyphens.
    pub fn new(account: impl Into<String>) -> Result<Self, ConfigError> {
        let account = account.into().trim().to_lowercase();
        if account.is_empty() {
            return Err(ConfigError::EmptyAccount);
        }

        let valid = !account.starts_with('-')
            && !account.ends_with('-')
            && account
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(ConfigError::InvalidAccount { account });
        }

        Ok(Self(account))
    }

    /// Returns the public endpoint for this account.
    #[must_use]
    pub fn default_endpoint(&self) -> String {
        format!("https://{}{}", self.0, Self::HOST_SUFFIX)
    }
}

impl AsRef<str> for DatabaseAccount {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DatabaseAccount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DatabaseAccount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A decoded Cosmos DB master key.
///
/// The key is supplied in the base64 form shown in the portal and decoded
/// exactly once, here. Only the raw bytes are retained.
///
/// # Security
///
/// The `Debug` implementation masks the key, displaying only
/// `MasterKey(*****)`. There is no accessor for the encoded form and the raw
/// bytes are only reachable from inside the crate, for signing.
///
/// # Example
///
/// ```rust
/// use cosmosdb::MasterKey;
///
/// let key = MasterKey::new("c2VjcmV0").unwrap();
/// assert_eq!(format!("{:?}", key), "MasterKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MasterKey(Vec<u8>);

impl MasterKey {
    /// Decodes a base64 master key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyMasterKey`] if the key is empty and
    /// [`ConfigError::InvalidMasterKey`] if it is not valid standard base64.
    pub fn new(encoded: impl AsRef<str>) -> Result<Self, ConfigError> {
        let encoded = encoded.as_ref().trim();
        if encoded.is_empty() {
            return Err(ConfigError::EmptyMasterKey);
        }

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| ConfigError::InvalidMasterKey {
                reason: e.to_string(),
            })?;
        if bytes.is_empty() {
            return Err(ConfigError::EmptyMasterKey);
        }

        Ok(Self(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(*****)")
    }
}

/// A validated service endpoint URL.
///
/// Overrides the account's public endpoint, e.g. to reach the local emulator
/// or a proxy. Any trailing `/` is removed so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use cosmosdb::Endpoint;
///
/// let endpoint = Endpoint::new("https://localhost:8081/").unwrap();
/// assert_eq!(endpoint.as_ref(), "https://localhost:8081");
/// assert_eq!(endpoint.scheme(), "https");
/// assert_eq!(endpoint.host_name(), "localhost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl Endpoint {
    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL has no scheme or host,
    /// or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        if url.contains(['?', '#']) {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(invalid());
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

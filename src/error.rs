//! Error types for the Cosmos DB client.
//!
//! This module contains the configuration and validation errors raised while
//! building a client. Errors raised while talking to the service live in
//! [`crate::clients`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. A malformed master key is rejected here, once, and
//! never per request.
//!
//! # Example
//!
//! ```rust
//! use cosmosdb::{DatabaseAccount, ConfigError};
//!
//! let result = DatabaseAccount::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccount)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Database account cannot be empty.
    #[error("Database account cannot be empty. Please provide a valid Cosmos DB account name.")]
    EmptyAccount,

    /// Database account contains characters outside `[a-z0-9-]`.
    #[error("Invalid database account '{account}'. Expected lowercase letters, digits and hyphens.")]
    InvalidAccount {
        /// The invalid account that was provided.
        account: String,
    },

    /// Master key cannot be empty.
    #[error("Master key cannot be empty. Please provide the account's base64 master key.")]
    EmptyMasterKey,

    /// Master key is not valid base64.
    #[error("Master key is not valid base64: {reason}")]
    InvalidMasterKey {
        /// The decoder's description of the failure.
        reason: String,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://myaccount.documents.azure.com').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2018-12-31').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A resource id cannot be used as a path segment.
    #[error("Invalid resource id '{id}': {reason}")]
    InvalidResourceId {
        /// The rejected id.
        id: String,
        /// Why the id was rejected.
        reason: &'static str,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_account_error_message() {
        let message = ConfigError::EmptyAccount.to_string();
        assert!(message.contains("cannot be empty"));
    }

    #[test]
    fn test_invalid_master_key_error_message() {
        let error = ConfigError::InvalidMasterKey {
            reason: "Invalid byte 33, offset 0.".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not valid base64"));
        assert!(message.contains("offset 0"));
    }

    #[test]
    fn test_invalid_resource_id_error_message() {
        let error = ConfigError::InvalidResourceId {
            id: "a/b".to_string(),
            reason: "ids cannot contain '/'",
        };
        let message = error.to_string();
        assert!(message.contains("a/b"));
        assert!(message.contains("'/'"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "account" };
        let message = error.to_string();
        assert!(message.contains("account"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyAccount;
        let _: &dyn std::error::Error = &error;
    }
}

//! REST API version definitions.
//!
//! Every request carries the protocol version in the `x-ms-version` header.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Cosmos DB REST API version.
///
/// # Example
///
/// ```rust
/// use cosmosdb::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert_eq!(version.to_string(), "2018-12-31");
///
/// let version: ApiVersion = "2017-02-22".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2017_02_22);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// API version 2017-02-22.
    V2017_02_22,
    /// API version 2018-06-18.
    V2018_06_18,
    /// API version 2018-12-31.
    V2018_12_31,
    /// Custom version string for versions this crate does not know about.
    Custom(String),
}

impl ApiVersion {
    /// Returns the version sent when none is configured.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2018_12_31
    }

    fn is_date_shaped(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2017_02_22 => f.write_str("2017-02-22"),
            Self::V2018_06_18 => f.write_str("2018-06-18"),
            Self::V2018_12_31 => f.write_str("2018-12-31"),
            Self::Custom(version) => f.write_str(version),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "2017-02-22" => Ok(Self::V2017_02_22),
            "2018-06-18" => Ok(Self::V2018_06_18),
            "2018-12-31" => Ok(Self::V2018_12_31),
            other if Self::is_date_shaped(other) => Ok(Self::Custom(other.to_string())),
            other => Err(ConfigError::InvalidApiVersion {
                version: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_default() {
        assert_eq!(ApiVersion::default(), ApiVersion::V2018_12_31);
    }

    #[test]
    fn test_known_versions_parse() {
        assert_eq!(
            "2018-06-18".parse::<ApiVersion>().unwrap(),
            ApiVersion::V2018_06_18
        );
    }

    #[test]
    fn test_custom_version_parses() {
        let version: ApiVersion = "2020-07-15".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2020-07-15".to_string()));
        assert_eq!(version.to_string(), "2020-07-15");
    }

    #[test]
    fn test_invalid_version_rejected() {
        assert!(matches!(
            "latest".parse::<ApiVersion>(),
            Err(ConfigError::InvalidApiVersion { .. })
        ));
        assert!("2018-1-31".parse::<ApiVersion>().is_err());
    }
}

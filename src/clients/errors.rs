//! Error types for requests to the Cosmos DB REST API.
//!
//! # Error Handling
//!
//! Every failure of an operation is reported as a [`CosmosError`]:
//!
//! - [`CosmosError::Encoding`]: A body could not be serialized or deserialized
//! - [`CosmosError::Transport`]: No response was obtained (DNS, connect, TLS, ...)
//! - [`CosmosError::Status`]: The service answered with an unexpected status
//! - [`CosmosError::PreconditionRequired`]: A replace or delete was attempted without an ETag
//! - [`CosmosError::MaxRetries`]: A configured cap on throttle retries was reached
//! - [`CosmosError::Timeout`]: The operation's deadline passed
//!
//! Classify service errors by HTTP status, never by message text:
//!
//! ```rust,ignore
//! use cosmosdb::CosmosError;
//!
//! match documents.replace(&person, &options).await {
//!     Ok(updated) => println!("new etag: {:?}", updated.etag),
//!     Err(e) if e.is_precondition_failed() => {
//!         // someone else changed it: re-read and try again
//!     }
//!     Err(e) if e.is_not_found() => println!("gone"),
//!     Err(e) => return Err(e),
//! }
//! ```

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::clients::http_response::CosmosResponse;
use crate::error::ConfigError;

/// The service answered with a status other than the expected one.
///
/// `code` and `message` come from the service's error payload
/// (`{"code": "...", "message": "..."}`). When the payload is missing or
/// cannot be decoded, `code` is empty and `message` carries the raw body.
///
/// # Example
///
/// ```rust
/// use cosmosdb::clients::StatusError;
///
/// let error = StatusError {
///     http_status: 412,
///     code: "PreconditionFailed".to_string(),
///     message: "Operation cannot be performed because one of the specified precondition is not met.".to_string(),
///     activity_id: None,
///     retry_after: None,
/// };
///
/// assert!(error.is_precondition_failed());
/// assert!(!error.is_not_found());
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{http_status} {code}: {message}")]
pub struct StatusError {
    /// The HTTP status code of the response.
    pub http_status: u16,
    /// The service's error code.
    pub code: String,
    /// The service's error message.
    pub message: String,
    /// Server-side id of the operation (from `x-ms-activity-id`).
    pub activity_id: Option<String>,
    /// Wait hint (from `x-ms-retry-after-ms`).
    pub retry_after: Option<Duration>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl StatusError {
    /// Builds the error for an unexpected response.
    #[must_use]
    pub fn from_response(response: &CosmosResponse) -> Self {
        let (code, message) = serde_json::from_slice::<ErrorPayload>(&response.body).map_or_else(
            |_| (String::new(), String::from_utf8_lossy(&response.body).into_owned()),
            |payload| (payload.code, payload.message),
        );

        Self {
            http_status: response.status,
            code,
            message,
            activity_id: response.activity_id.clone(),
            retry_after: response.retry_after,
        }
    }

    /// Returns `true` for 404 Not Found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.http_status == 404
    }

    /// Returns `true` for 409 Conflict.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        self.http_status == 409
    }

    /// Returns `true` for 412 Precondition Failed (stale ETag).
    #[must_use]
    pub const fn is_precondition_failed(&self) -> bool {
        self.http_status == 412
    }

    /// Returns `true` for 429 Too Many Requests.
    #[must_use]
    pub const fn is_throttled(&self) -> bool {
        self.http_status == 429
    }
}

/// A request failed validation before it was sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PUT request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was given a body.
    #[error("Cannot send data with {method}.")]
    UnexpectedBody {
        /// The HTTP method that takes no body.
        method: String,
    },
}

/// Unified error type for all operations.
#[derive(Debug, Error)]
pub enum CosmosError {
    /// A body could not be serialized or deserialized.
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// No response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an unexpected status.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// A replace or delete was attempted on an entity without an ETag.
    #[error("{resource} '{id}' has no ETag; replace and delete require one")]
    PreconditionRequired {
        /// The kind of resource (e.g. "Document").
        resource: &'static str,
        /// The id of the entity.
        id: String,
    },

    /// The configured cap on throttle retries was reached.
    #[error("Exceeded maximum retry count of {tries}. Last error: {last}")]
    MaxRetries {
        /// The number of attempts made.
        tries: u32,
        /// The last throttling response.
        last: StatusError,
    },

    /// The operation's deadline passed.
    #[error("Operation timed out")]
    Timeout,

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),

    /// An id or setting was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CosmosError {
    /// Returns the HTTP status of a [`CosmosError::Status`] error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status(e) => Some(e.http_status),
            _ => None,
        }
    }

    /// Returns `true` if the service answered 404 Not Found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status(e) if e.is_not_found())
    }

    /// Returns `true` if the service answered 412 Precondition Failed.
    #[must_use]
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self, Self::Status(e) if e.is_precondition_failed())
    }

    /// Returns `true` if the service answered 409 Conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Status(e) if e.is_conflict())
    }
}

/// Returns `true` if `err` is a service error with the given status.
///
/// # Example
///
/// ```rust
/// use cosmosdb::clients::{is_error_status_code, CosmosError, StatusError};
///
/// let err = CosmosError::Status(StatusError {
///     http_status: 404,
///     code: "NotFound".to_string(),
///     message: "Resource Not Found".to_string(),
///     activity_id: None,
///     retry_after: None,
/// });
/// assert!(is_error_status_code(&err, 404));
/// assert!(!is_error_status_code(&err, 412));
/// ```
#[must_use]
pub fn is_error_status_code(err: &CosmosError, status: u16) -> bool {
    matches!(err.status(), Some(s) if s == status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn status_error(http_status: u16) -> StatusError {
        StatusError {
            http_status,
            code: String::new(),
            message: String::new(),
            activity_id: None,
            retry_after: None,
        }
    }

    #[test]
    fn test_status_error_decodes_service_payload() {
        let mut headers = HashMap::new();
        headers.insert("x-ms-activity-id".to_string(), vec!["act-1".to_string()]);
        let response = CosmosResponse::new(
            404,
            headers,
            br#"{"code":"NotFound","message":"Entity with the specified id does not exist in the system."}"#.to_vec(),
        );

        let error = StatusError::from_response(&response);
        assert_eq!(error.http_status, 404);
        assert_eq!(error.code, "NotFound");
        assert!(error.message.starts_with("Entity with the specified id"));
        assert_eq!(error.activity_id.as_deref(), Some("act-1"));
        assert_eq!(
            error.to_string(),
            "404 NotFound: Entity with the specified id does not exist in the system."
        );
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let response = CosmosResponse::new(502, HashMap::new(), b"Bad Gateway".to_vec());
        let error = StatusError::from_response(&response);
        assert_eq!(error.code, "");
        assert_eq!(error.message, "Bad Gateway");
    }

    #[test]
    fn test_status_error_carries_retry_hint() {
        let mut headers = HashMap::new();
        headers.insert("x-ms-retry-after-ms".to_string(), vec!["250".to_string()]);
        let response = CosmosResponse::new(429, headers, Vec::new());

        let error = StatusError::from_response(&response);
        assert!(error.is_throttled());
        assert_eq!(error.retry_after, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_classification_is_by_status() {
        assert!(status_error(404).is_not_found());
        assert!(status_error(409).is_conflict());
        assert!(status_error(412).is_precondition_failed());
        assert!(status_error(429).is_throttled());
        assert!(!status_error(412).is_not_found());
        assert!(!status_error(404).is_precondition_failed());
    }

    #[test]
    fn test_cosmos_error_helpers() {
        let not_found = CosmosError::Status(status_error(404));
        assert_eq!(not_found.status(), Some(404));
        assert!(not_found.is_not_found());
        assert!(!not_found.is_precondition_failed());

        let precondition = CosmosError::Status(status_error(412));
        assert!(precondition.is_precondition_failed());
        assert!(is_error_status_code(&precondition, 412));

        let local = CosmosError::PreconditionRequired {
            resource: "Document",
            id: "jim".to_string(),
        };
        assert_eq!(local.status(), None);
        assert!(!is_error_status_code(&local, 412));
        assert!(local.to_string().contains("jim"));
    }

    #[test]
    fn test_max_retries_message() {
        let error = CosmosError::MaxRetries {
            tries: 3,
            last: status_error(429),
        };
        assert!(error.to_string().contains("Exceeded maximum retry count of 3"));
    }

    #[test]
    fn test_invalid_request_messages() {
        assert_eq!(
            InvalidRequestError::MissingBody {
                method: "POST".to_string()
            }
            .to_string(),
            "Cannot use POST without specifying data."
        );
        assert_eq!(
            InvalidRequestError::MissingBodyType.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }
}

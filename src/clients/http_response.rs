//! Response value objects for the Cosmos DB REST API.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::clients::errors::CosmosError;
use crate::clients::headers;

/// A response from the Cosmos DB REST API.
///
/// Contains the status code, lower-cased headers and raw body, plus the
/// protocol headers the client acts on, parsed once at construction.
///
/// # Example
///
/// ```rust
/// use cosmosdb::clients::CosmosResponse;
/// use std::collections::HashMap;
///
/// let mut headers = HashMap::new();
/// headers.insert("x-ms-continuation".to_string(), vec!["next-page".to_string()]);
///
/// let response = CosmosResponse::new(200, headers, br#"{"_count":0}"#.to_vec());
/// assert_eq!(response.continuation.as_deref(), Some("next-page"));
/// ```
#[derive(Clone, Debug)]
pub struct CosmosResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
    /// Continuation token for the next page; `None` when absent or empty.
    pub continuation: Option<String>,
    /// Wait hint on throttled responses (from `x-ms-retry-after-ms`).
    pub retry_after: Option<Duration>,
    /// Server-side id of the operation (from `x-ms-activity-id`).
    pub activity_id: Option<String>,
    /// Request units consumed (from `x-ms-request-charge`).
    pub request_charge: Option<f64>,
    /// Entity tag of the returned entity (from `etag`).
    pub etag: Option<String>,
    /// Session consistency token (from `x-ms-session-token`).
    pub session_token: Option<String>,
}

impl CosmosResponse {
    /// Creates a new `CosmosResponse` with automatic header parsing.
    ///
    /// Header names are expected in lower case.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let continuation = first(headers::CONTINUATION);
        let retry_after = first(headers::RETRY_AFTER_MS).and_then(|v| parse_millis(&v));
        let activity_id = first(headers::ACTIVITY_ID);
        let request_charge = first(headers::REQUEST_CHARGE).and_then(|v| v.parse::<f64>().ok());
        let etag = first(headers::ETAG);
        let session_token = first(headers::SESSION_TOKEN);

        Self {
            status,
            headers,
            body,
            continuation,
            retry_after,
            activity_id,
            request_charge,
            etag,
            session_token,
        }
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if the response has no body.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Encoding`] if the body does not decode into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CosmosError> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Parses a millisecond count, accepting fractional values.
fn parse_millis(value: &str) -> Option<Duration> {
    if let Ok(ms) = value.parse::<u64>() {
        return Some(Duration::from_millis(ms));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .map(|ms| Duration::from_secs_f64(ms / 1000.0))
}

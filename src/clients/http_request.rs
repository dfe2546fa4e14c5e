//! Request value objects for the Cosmos DB REST API.
//!
//! A [`CosmosRequest`] describes one logical operation completely: verb, path,
//! the descriptor that gets signed, the one status that counts as success, an
//! optional body and the protocol headers. Requests are immutable once built;
//! anything that varies per page (the continuation token) produces a new
//! request via [`CosmosRequest::with_continuation`].

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tokio::time::Instant;

use crate::auth::ResourceDescriptor;
use crate::clients::errors::InvalidRequestError;
use crate::clients::headers;

/// HTTP methods used by the Cosmos DB REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for reads and feeds.
    Get,
    /// HTTP POST method for creates and queries.
    Post,
    /// HTTP PUT method for replaces.
    Put,
    /// HTTP DELETE method for deletes.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Content type for request bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// Entity payloads (`application/json`).
    Json,
    /// Query payloads (`application/query+json`).
    QueryJson,
}

impl DataType {
    /// Returns the MIME type string for this data type.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::QueryJson => "application/query+json",
        }
    }
}

/// Operation-specific request headers.
///
/// Empty string values are treated as absent: an empty `if_match` or
/// `continuation` is never put on the wire.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestHeaders {
    /// Entity tag the target must still carry (`If-Match`).
    pub if_match: Option<String>,
    /// Continuation token of the page to fetch.
    pub continuation: Option<String>,
    /// Partition key value of the addressed document.
    pub partition_key: Option<Value>,
    /// Marks the request as a query.
    pub is_query: bool,
    /// Lets a query span all partitions.
    pub enable_cross_partition_query: bool,
    /// Page size hint.
    pub max_item_count: Option<u32>,
    /// Turns a create into an upsert.
    pub upsert: bool,
    /// Additional raw headers.
    pub extra: HashMap<String, String>,
}

impl RequestHeaders {
    /// Renders the headers as name/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the partition key cannot be encoded.
    pub fn to_pairs(&self) -> Result<Vec<(String, String)>, serde_json::Error> {
        let mut pairs = Vec::new();
        let mut push = |name: &str, value: String| pairs.push((name.to_string(), value));

        if let Some(etag) = self.if_match.as_deref().filter(|v| !v.is_empty()) {
            push(headers::IF_MATCH, etag.to_string());
        }
        if let Some(token) = self.continuation.as_deref().filter(|v| !v.is_empty()) {
            push(headers::CONTINUATION, token.to_string());
        }
        if let Some(key) = &self.partition_key {
            push(
                headers::PARTITION_KEY,
                serde_json::to_string(&Value::Array(vec![key.clone()]))?,
            );
        }
        if self.is_query {
            push(headers::IS_QUERY, "True".to_string());
        }
        if self.enable_cross_partition_query {
            push(headers::ENABLE_CROSS_PARTITION_QUERY, "True".to_string());
        }
        if let Some(count) = self.max_item_count {
            push(headers::MAX_ITEM_COUNT, count.to_string());
        }
        if self.upsert {
            push(headers::IS_UPSERT, "True".to_string());
        }
        for (name, value) in &self.extra {
            push(name, value.clone());
        }

        Ok(pairs)
    }
}

/// One request to the Cosmos DB REST API.
///
/// Use [`CosmosRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use cosmosdb::clients::{CosmosRequest, HttpMethod};
/// use cosmosdb::{ResourceDescriptor, ResourceLink, ResourceType};
/// use serde_json::json;
///
/// let request = CosmosRequest::builder(
///     HttpMethod::Post,
///     "dbs",
///     ResourceDescriptor::new(ResourceType::Databases, ResourceLink::root()),
/// )
/// .expected_status(201)
/// .body(json!({"id": "testdb"}))
/// .build()
/// .unwrap();
///
/// assert_eq!(request.expected_status, 201);
/// ```
#[derive(Clone, Debug)]
pub struct CosmosRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The path relative to the endpoint, e.g. `dbs/testdb/colls`.
    pub path: String,
    /// What the signature covers.
    pub descriptor: ResourceDescriptor,
    /// The one status code that counts as success.
    pub expected_status: u16,
    /// The request body, if any.
    pub body: Option<Value>,
    /// The content type of the body.
    pub body_type: Option<DataType>,
    /// Operation-specific headers.
    pub headers: RequestHeaders,
    /// Instant after which the operation is abandoned.
    pub deadline: Option<Instant>,
}

impl CosmosRequest {
    /// Creates a new builder for constructing a `CosmosRequest`.
    #[must_use]
    pub fn builder(
        method: HttpMethod,
        path: impl Into<String>,
        descriptor: ResourceDescriptor,
    ) -> CosmosRequestBuilder {
        CosmosRequestBuilder::new(method, path, descriptor)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if:
    /// - `body` is `Some` but `body_type` is `None`
    /// - `method` is `Post` or `Put` but `body` is `None`
    /// - `method` is `Get` or `Delete` but `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidRequestError::MissingBodyType);
        }

        match (self.method, &self.body) {
            (HttpMethod::Post | HttpMethod::Put, None) => Err(InvalidRequestError::MissingBody {
                method: self.method.to_string(),
            }),
            (HttpMethod::Get | HttpMethod::Delete, Some(_)) => {
                Err(InvalidRequestError::UnexpectedBody {
                    method: self.method.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Returns `true` if `status` counts as success for this request.
    ///
    /// An upsert answers 201 when it creates and 200 when it replaces, so 200
    /// is accepted alongside the declared status when `upsert` is set.
    #[must_use]
    pub const fn is_expected(&self, status: u16) -> bool {
        status == self.expected_status || (self.headers.upsert && status == 200)
    }

    /// Returns a copy of this request that resumes at `token`.
    ///
    /// `None` or an empty token yields a request without a continuation header.
    #[must_use]
    pub fn with_continuation(&self, token: Option<&str>) -> Self {
        let mut request = self.clone();
        request.headers.continuation = token.filter(|t| !t.is_empty()).map(str::to_string);
        request
    }
}

/// Builder for constructing [`CosmosRequest`] instances.
#[derive(Debug)]
pub struct CosmosRequestBuilder {
    method: HttpMethod,
    path: String,
    descriptor: ResourceDescriptor,
    expected_status: u16,
    body: Option<Value>,
    body_type: Option<DataType>,
    headers: RequestHeaders,
    deadline: Option<Instant>,
}

impl CosmosRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>, descriptor: ResourceDescriptor) -> Self {
        Self {
            method,
            path: path.into(),
            descriptor,
            expected_status: 200,
            body: None,
            body_type: None,
            headers: RequestHeaders::default(),
            deadline: None,
        }
    }

    /// Sets the status that counts as success (default 200).
    #[must_use]
    pub const fn expected_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Sets a JSON request body.
    ///
    /// The body type defaults to [`DataType::Json`] unless set explicitly.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self.body_type.get_or_insert(DataType::Json);
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    /// Replaces all operation-specific headers.
    #[must_use]
    pub fn headers(mut self, headers: RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the `If-Match` precondition.
    #[must_use]
    pub fn if_match(mut self, etag: impl Into<String>) -> Self {
        self.headers.if_match = Some(etag.into());
        self
    }

    /// Sets the continuation token.
    #[must_use]
    pub fn continuation(mut self, token: impl Into<String>) -> Self {
        self.headers.continuation = Some(token.into());
        self
    }

    /// Sets the partition key value.
    #[must_use]
    pub fn partition_key(mut self, key: impl Into<Value>) -> Self {
        self.headers.partition_key = Some(key.into());
        self
    }

    /// Sets the page size hint.
    #[must_use]
    pub const fn max_item_count(mut self, count: u32) -> Self {
        self.headers.max_item_count = Some(count);
        self
    }

    /// Marks the request as a query, optionally spanning all partitions.
    #[must_use]
    pub const fn query(mut self, cross_partition: bool) -> Self {
        self.headers.is_query = true;
        self.headers.enable_cross_partition_query = cross_partition;
        self
    }

    /// Turns a create into an upsert.
    #[must_use]
    pub const fn upsert(mut self, upsert: bool) -> Self {
        self.headers.upsert = upsert;
        self
    }

    /// Adds a single raw header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.extra.insert(name.into(), value.into());
        self
    }

    /// Sets the instant after which the operation is abandoned.
    #[must_use]
    pub const fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builds the [`CosmosRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRequestError`] if the request fails validation.
    pub fn build(self) -> Result<CosmosRequest, InvalidRequestError> {
        let request = CosmosRequest {
            method: self.method,
            path: self.path,
            descriptor: self.descriptor,
            expected_status: self.expected_status,
            body: self.body,
            body_type: self.body_type,
            headers: self.headers,
            deadline: self.deadline,
        };
        request.verify()?;
        Ok(request)
    }
}

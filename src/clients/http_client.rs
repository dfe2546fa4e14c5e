//! HTTP client for Cosmos DB REST API communication.
//!
//! This module provides the [`HttpClient`] type, the single choke point
//! through which every resource client reaches the network.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::auth::{request_date, Credential, Signer};
use crate::clients::errors::{CosmosError, StatusError};
use crate::clients::headers;
use crate::clients::http_request::CosmosRequest;
use crate::clients::http_response::CosmosResponse;
use crate::clients::retry::RetryPolicy;
use crate::config::CosmosConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making signed requests to the Cosmos DB REST API.
///
/// The client handles:
/// - URL construction from the configured endpoint
/// - Default headers including User-Agent, Accept and `x-ms-version`
/// - Per-attempt request signing with a fresh `x-ms-date`
/// - Status classification against each request's expected status
/// - Throttling retries through its [`RetryPolicy`]
///
/// The client holds no per-call mutable state.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use cosmosdb::clients::{CosmosRequest, HttpClient, HttpMethod};
/// use cosmosdb::{ResourceDescriptor, ResourceLink, ResourceType};
///
/// let client = HttpClient::new(&config)?;
///
/// let request = CosmosRequest::builder(
///     HttpMethod::Get,
///     "dbs",
///     ResourceDescriptor::new(ResourceType::Databases, ResourceLink::root()),
/// )
/// .build()?;
///
/// let response = client.execute(&request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://my-account.documents.azure.com`).
    base_uri: String,
    /// Request signer.
    signer: Signer,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Throttling policy wrapped around every request.
    retry: RetryPolicy,
    /// Default time budget of one logical operation.
    operation_timeout: Option<Duration>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Transport`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &CosmosConfig) -> Result<Self, CosmosError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a new HTTP client on top of an existing reqwest client.
    ///
    /// Use this to share one connection pool between several clients.
    #[must_use]
    pub fn with_client(config: &CosmosConfig, client: reqwest::Client) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}cosmosdb-rest v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert(headers::USER_AGENT.to_string(), user_agent);
        default_headers.insert(headers::ACCEPT.to_string(), "application/json".to_string());
        default_headers.insert(
            headers::VERSION.to_string(),
            config.api_version().to_string(),
        );

        Self {
            client,
            base_uri: config.endpoint(),
            signer: Signer::new(Credential::from_config(config)),
            default_headers,
            retry: RetryPolicy::from_config(config),
            operation_timeout: config.operation_timeout(),
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the throttling policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the signer used for every request.
    #[must_use]
    pub const fn signer(&self) -> &Signer {
        &self.signer
    }

    /// Sends a request, absorbing throttling responses.
    ///
    /// The request's deadline, or the configured operation timeout counted
    /// from now, bounds the whole operation including retry waits.
    ///
    /// # Errors
    ///
    /// Returns any error of [`HttpClient::execute_once`] other than
    /// throttling, [`CosmosError::MaxRetries`] if a configured retry cap is
    /// exceeded, or [`CosmosError::Timeout`] when the deadline passes.
    pub async fn execute(&self, request: &CosmosRequest) -> Result<CosmosResponse, CosmosError> {
        let deadline = request
            .deadline
            .or_else(|| self.operation_timeout.map(|timeout| Instant::now() + timeout));

        self.retry
            .run(deadline, || self.execute_once(request, deadline))
            .await
    }

    /// Sends a request exactly once.
    ///
    /// Signs the request with a fresh date, issues it and compares the status
    /// against `request.expected_status`. Nothing is retried here.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`CosmosError::InvalidRequest`] if request validation fails
    /// - [`CosmosError::Encoding`] if the body or headers cannot be encoded
    /// - [`CosmosError::Transport`] if no response was obtained
    /// - [`CosmosError::Status`] if the status differs from the expected one
    /// - [`CosmosError::Timeout`] if `deadline` passes during the call
    pub async fn execute_once(
        &self,
        request: &CosmosRequest,
        deadline: Option<Instant>,
    ) -> Result<CosmosResponse, CosmosError> {
        request.verify()?;

        let body = request.body.as_ref().map(serde_json::to_vec).transpose()?;
        let extra_headers = request.headers.to_pairs()?;

        let url = format!("{}/{}", self.base_uri, request.path);
        let date = request_date();
        let authorization = self
            .signer
            .authorization(request.method, &request.descriptor, &date);

        let mut req_builder = self.client.request(request.method.into(), &url);
        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder
            .header(headers::DATE, &date)
            .header(headers::AUTHORIZATION, authorization);
        if let (Some(body), Some(body_type)) = (body, request.body_type) {
            req_builder = req_builder
                .header(headers::CONTENT_TYPE, body_type.as_content_type())
                .body(body);
        }
        for (key, value) in &extra_headers {
            req_builder = req_builder.header(key, value);
        }

        let exchange = async {
            let res = req_builder.send().await?;
            let status = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body = res.bytes().await?;
            Ok::<_, CosmosError>(CosmosResponse::new(status, res_headers, body.to_vec()))
        };

        let response = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, exchange)
                .await
                .map_err(|_| CosmosError::Timeout)??,
            None => exchange.await?,
        };

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = response.status,
            expected = request.expected_status,
            request_charge = response.request_charge.unwrap_or_default(),
            "Cosmos DB request completed"
        );

        if request.is_expected(response.status) {
            return Ok(response);
        }

        Err(CosmosError::Status(StatusError::from_response(&response)))
    }

    /// Parses response headers into a `HashMap` keyed by lower-cased name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

//! HTTP client types for Cosmos DB REST API communication.
//!
//! This module provides the request executor every resource client goes
//! through. It handles signing, status classification, response header
//! parsing and throttling retries.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`CosmosClient`]: The account-level entry point handing out resource clients
//! - [`HttpClient`]: The async executor for API communication
//! - [`CosmosRequest`]: A request to be sent to the API
//! - [`CosmosResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`DataType`]: Content types for request bodies
//! - [`RetryPolicy`]: Throttling retry behavior
//! - [`CosmosError`]: Unified error type
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb::clients::{CosmosRequest, HttpClient, HttpMethod};
//! use cosmosdb::{ResourceDescriptor, ResourceLink, ResourceType};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = CosmosRequest::builder(
//!     HttpMethod::Get,
//!     "dbs",
//!     ResourceDescriptor::new(ResourceType::Databases, ResourceLink::root()),
//! )
//! .build()?;
//!
//! let response = client.execute(&request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! - **429 (Too Many Requests)**: Retried after `x-ms-retry-after-ms`, or the
//!   configured fallback wait if the header is missing
//! - **Everything else**: Returned immediately without retry
//!
//! Retries are unbounded unless a cap is configured; a deadline bounds the
//! whole operation either way.

mod cosmos_client;
mod errors;
pub mod headers;
mod http_client;
mod http_request;
mod http_response;
mod retry;

pub use cosmos_client::CosmosClient;
pub use errors::{is_error_status_code, CosmosError, InvalidRequestError, StatusError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    CosmosRequest, CosmosRequestBuilder, DataType, HttpMethod, RequestHeaders,
};
pub use http_response::CosmosResponse;
pub use retry::RetryPolicy;

//! # Cosmos DB REST client
//!
//! A typed, async Rust client for the Cosmos DB SQL REST API, built around
//! one shared request executor.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`CosmosConfig`] and [`CosmosConfigBuilder`]
//! - Validated newtypes for the account, master key, endpoint and resource ids
//! - Master-key request signing via [`auth::Signer`]
//! - An async executor with status classification and throttling retries
//! - Cursor-based pagination over feeds and queries
//! - One generic [`rest::ResourceClient`] for databases, collections,
//!   documents, triggers, stored procedures, user-defined functions and
//!   partition key ranges
//!
//! ## Quick Start
//!
//! ```rust
//! use cosmosdb::{CosmosConfig, DatabaseAccount, MasterKey, ApiVersion};
//!
//! // Create configuration using the builder pattern
//! let config = CosmosConfig::builder()
//!     .account(DatabaseAccount::new("my-account").unwrap())
//!     .master_key(MasterKey::new("c2VjcmV0").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint(), "https://my-account.documents.azure.com");
//! ```
//!
//! ## Working With Documents
//!
//! ```rust,ignore
//! use cosmosdb::{CosmosClient, CosmosError};
//! use cosmosdb::rest::{RequestOptions, Resource, ResourceKind};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Person {
//!     id: String,
//!     #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
//!     etag: Option<String>,
//!     surname: String,
//! }
//!
//! impl Resource for Person {
//!     const KIND: ResourceKind = ResourceKind::DOCUMENT;
//!     fn id(&self) -> &str { &self.id }
//!     fn etag(&self) -> Option<&str> { self.etag.as_deref() }
//! }
//!
//! let client = CosmosClient::new(&config)?;
//! let people = client.documents::<Person>("testdb", "people")?;
//! let options = RequestOptions::new().partition_key("jim");
//!
//! let mut jim = people.get("jim", &options).await?;
//! jim.surname = "Morrison".to_string();
//!
//! match people.replace(&jim, &options).await {
//!     Ok(updated) => println!("new etag: {:?}", updated.etag),
//!     Err(e) if e.is_precondition_failed() => println!("changed concurrently"),
//!     Err(e) => return Err(e),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients are `Send + Sync`; cursors are advanced through `&mut`
//! - **Async-first**: Designed for use with Tokio; nothing is spawned internally
//! - **Status, not text**: Errors are classified by HTTP status

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::{Credential, ResourceDescriptor, ResourceId, ResourceLink, ResourceType, Signer};
pub use config::{
    ApiVersion, CosmosConfig, CosmosConfigBuilder, DatabaseAccount, Endpoint, MasterKey,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    CosmosClient, CosmosError, CosmosRequest, CosmosRequestBuilder, CosmosResponse, DataType,
    HttpClient, HttpMethod, RetryPolicy, StatusError,
};

// Re-export resource types
pub use rest::{Cursor, Page, Query, RequestOptions, Resource, ResourceClient, ResourceKind};

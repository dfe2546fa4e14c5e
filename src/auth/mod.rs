//! Authentication types for the Cosmos DB REST API.
//!
//! Requests are authorized with the account's master key: each one carries an
//! HMAC-SHA256 signature over its verb, resource type, resource link and date.
//!
//! # Overview
//!
//! - [`Credential`]: The account name and decoded master key
//! - [`Signer`]: Produces `authorization` header values from a credential
//! - [`ResourceDescriptor`]: The (resource type, resource link) pair a signature covers
//! - [`ResourceType`], [`ResourceLink`], [`ResourceId`]: The pieces of a descriptor
//!
//! # Example
//!
//! ```rust
//! use cosmosdb::auth::{request_date, Credential, Signer};
//! use cosmosdb::{DatabaseAccount, HttpMethod, MasterKey, ResourceDescriptor, ResourceLink, ResourceType};
//!
//! let signer = Signer::new(Credential::new(
//!     DatabaseAccount::new("testaccount").unwrap(),
//!     MasterKey::new("c2VjcmV0").unwrap(),
//! ));
//!
//! let descriptor = ResourceDescriptor::new(ResourceType::Databases, ResourceLink::root());
//! let date = request_date();
//! let authorization = signer.authorization(HttpMethod::Post, &descriptor, &date);
//! assert!(!authorization.is_empty());
//! ```

mod credential;
mod descriptor;
mod signer;

pub use credential::Credential;
pub use descriptor::{ResourceDescriptor, ResourceId, ResourceLink, ResourceType};
pub use signer::{format_request_date, request_date, string_to_sign, Signer};

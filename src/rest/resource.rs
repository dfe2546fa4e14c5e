//! The [`Resource`] trait implemented by every entity a [`ResourceClient`]
//! can address.
//!
//! All resource types share one execution path. What differs between them is
//! captured by a [`ResourceKind`]: the resource-type tag that is signed, the
//! path segment preceding ids, and the key under which feeds list entities.
//!
//! # Implementing a Resource
//!
//! Application documents implement the trait with [`ResourceKind::DOCUMENT`]:
//!
//! ```rust
//! use cosmosdb::rest::{Resource, ResourceKind};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Person {
//!     pub id: String,
//!     #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
//!     pub etag: Option<String>,
//!     pub surname: String,
//! }
//!
//! impl Resource for Person {
//!     const KIND: ResourceKind = ResourceKind::DOCUMENT;
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!
//!     fn etag(&self) -> Option<&str> {
//!         self.etag.as_deref()
//!     }
//! }
//! ```
//!
//! [`ResourceClient`]: crate::rest::ResourceClient

use serde::{de::DeserializeOwned, Serialize};

use crate::auth::ResourceType;

/// Per-type configuration of the generic resource client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceKind {
    /// The resource-type tag, also used as the path segment.
    pub resource_type: ResourceType,
    /// Human-readable singular name, used in error messages.
    pub name: &'static str,
    /// Key of the entity array in feed and query responses.
    pub list_key: &'static str,
}

impl ResourceKind {
    /// Databases, listed under `Databases`.
    pub const DATABASE: Self = Self::new(ResourceType::Databases, "Database", "Databases");
    /// Collections, listed under `DocumentCollections`.
    pub const COLLECTION: Self = Self::new(
        ResourceType::Collections,
        "Collection",
        "DocumentCollections",
    );
    /// Documents, listed under `Documents`.
    pub const DOCUMENT: Self = Self::new(ResourceType::Documents, "Document", "Documents");
    /// Triggers, listed under `Triggers`.
    pub const TRIGGER: Self = Self::new(ResourceType::Triggers, "Trigger", "Triggers");
    /// Stored procedures, listed under `StoredProcedures`.
    pub const STORED_PROCEDURE: Self = Self::new(
        ResourceType::StoredProcedures,
        "StoredProcedure",
        "StoredProcedures",
    );
    /// User-defined functions, listed under `UserDefinedFunctions`.
    pub const USER_DEFINED_FUNCTION: Self = Self::new(
        ResourceType::UserDefinedFunctions,
        "UserDefinedFunction",
        "UserDefinedFunctions",
    );
    /// Partition key ranges, listed under `PartitionKeyRanges`.
    pub const PARTITION_KEY_RANGE: Self = Self::new(
        ResourceType::PartitionKeyRanges,
        "PartitionKeyRange",
        "PartitionKeyRanges",
    );

    /// Creates a resource kind.
    #[must_use]
    pub const fn new(
        resource_type: ResourceType,
        name: &'static str,
        list_key: &'static str,
    ) -> Self {
        Self {
            resource_type,
            name,
            list_key,
        }
    }

    /// Returns the path segment preceding ids of this kind.
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        self.resource_type.as_str()
    }
}

/// An entity that can be created, read, listed, queried, replaced and deleted.
///
/// # Required Bounds
///
/// Resources must be serializable, deserializable, cloneable, and thread-safe.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// How this type is addressed and listed.
    const KIND: ResourceKind;

    /// Returns the user-assigned id.
    fn id(&self) -> &str;

    /// Returns the entity tag, `None` for entities never read from the service.
    fn etag(&self) -> Option<&str>;
}

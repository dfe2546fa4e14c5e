//! Resource identity used for addressing and signing.
//!
//! A request's signature covers the logical identity of the resource, the
//! (resource-type, resource-link) pair, rather than the wire path. These types
//! keep the two in lockstep: ids are validated once, so the link that gets
//! signed is exactly the path the service reconstructs.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// The resource-type tag of a Cosmos DB resource.
///
/// The tag doubles as the path segment that precedes ids of that type
/// (`dbs/{db}/colls/{coll}/docs/{doc}`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// Databases (`dbs`).
    Databases,
    /// Collections (`colls`).
    Collections,
    /// Documents (`docs`).
    Documents,
    /// Triggers (`triggers`).
    Triggers,
    /// Stored procedures (`sprocs`).
    StoredProcedures,
    /// User-defined functions (`udfs`).
    UserDefinedFunctions,
    /// Partition key ranges (`pkranges`).
    PartitionKeyRanges,
}

impl ResourceType {
    /// Returns the tag as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Databases => "dbs",
            Self::Collections => "colls",
            Self::Documents => "docs",
            Self::Triggers => "triggers",
            Self::StoredProcedures => "sprocs",
            Self::UserDefinedFunctions => "udfs",
            Self::PartitionKeyRanges => "pkranges",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated resource id, usable as a single path segment.
///
/// # Example
///
/// ```rust
/// use cosmosdb::ResourceId;
///
/// assert!(ResourceId::new("testdb").is_ok());
/// assert!(ResourceId::new("a/b").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a new validated id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidResourceId`] if the id is empty, carries
    /// leading or trailing whitespace, is a `.` or `..` dot segment, or
    /// contains `/`, `\`, `?`, `#`, `%` or a control character.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        let reason = if id.is_empty() {
            Some("ids cannot be empty")
        } else if id.trim() != id {
            Some("ids cannot start or end with whitespace")
        } else if id == "." || id == ".." {
            Some("ids cannot be '.' or '..'")
        } else if id.contains('/') {
            Some("ids cannot contain '/'")
        } else if id.contains('\\') {
            Some("ids cannot contain '\\'")
        } else if id.contains(['?', '#']) {
            Some("ids cannot contain '?' or '#'")
        } else if id.contains('%') {
            Some("ids cannot contain '%'")
        } else if id.chars().any(char::is_control) {
            Some("ids cannot contain control characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ConfigError::InvalidResourceId { id, reason }),
            None => Ok(Self(id)),
        }
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// The name-based link of a resource, e.g. `dbs/testdb/colls/people`.
///
/// The root link (the account itself) is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResourceLink(String);

impl ResourceLink {
    /// Returns the account-level link.
    #[must_use]
    pub const fn root() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the account-level link.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the link of the item `id` of type `resource_type` under this link.
    #[must_use]
    pub fn item(&self, resource_type: ResourceType, id: &ResourceId) -> Self {
        Self(format!("{}/{id}", self.feed(resource_type)))
    }

    /// Returns the path of the feed of `resource_type` under this link.
    ///
    /// Feeds are addressed by path but signed with their parent's link.
    #[must_use]
    pub fn feed(&self, resource_type: ResourceType) -> String {
        if self.is_root() {
            resource_type.as_str().to_string()
        } else {
            format!("{}/{resource_type}", self.0)
        }
    }
}

impl AsRef<str> for ResourceLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a request's signature covers: a resource type and a resource link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// The resource-type tag.
    pub resource_type: ResourceType,
    /// The resource link.
    pub link: ResourceLink,
}

impl ResourceDescriptor {
    /// Creates a new descriptor.
    #[must_use]
    pub const fn new(resource_type: ResourceType, link: ResourceLink) -> Self {
        Self {
            resource_type,
            link,
        }
    }
}

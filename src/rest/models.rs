//! Built-in resource types.
//!
//! Every entity carries the same service-generated properties (`_rid`,
//! `_ts`, `_self`, `_etag`), gathered in [`SystemProperties`] and flattened
//! into each model. Application documents are user-defined; see
//! [`Resource`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rest::{Resource, ResourceKind};

/// Properties the service generates for every entity.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SystemProperties {
    /// Service-assigned resource id.
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,

    /// Last modification, in seconds since the Unix epoch.
    #[serde(rename = "_ts", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Addressable link built from resource ids.
    #[serde(rename = "_self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,

    /// Entity tag for optimistic concurrency.
    #[serde(rename = "_etag", default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// A database.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Database {
    /// The user-assigned id.
    pub id: String,

    /// Service-generated properties.
    #[serde(flatten)]
    pub system: SystemProperties,

    /// Relative link of the database's collection feed.
    #[serde(rename = "_colls", default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<String>,

    /// Relative link of the database's user feed.
    #[serde(rename = "_users", default, skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
}

impl Database {
    /// Creates a database definition with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// How documents are distributed over partitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum PartitionKind {
    /// Hash partitioning.
    #[default]
    Hash,
    /// Range partitioning.
    Range,
}

/// The partition key definition of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PartitionKey {
    /// JSON paths of the key, e.g. `/id`.
    pub paths: Vec<String>,

    /// Partitioning scheme; the service defaults to hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PartitionKind>,
}

impl PartitionKey {
    /// Creates a hash partition key on a single path.
    #[must_use]
    pub fn hash(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
            kind: Some(PartitionKind::Hash),
        }
    }
}

/// A document collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// The user-assigned id.
    pub id: String,

    /// Service-generated properties.
    #[serde(flatten)]
    pub system: SystemProperties,

    /// Indexing policy, passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<Value>,

    /// Partition key definition; `None` for unpartitioned collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKey>,

    /// Relative link of the document feed.
    #[serde(rename = "_docs", default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<String>,

    /// Relative link of the stored procedure feed.
    #[serde(rename = "_sprocs", default, skip_serializing_if = "Option::is_none")]
    pub stored_procedures: Option<String>,

    /// Relative link of the trigger feed.
    #[serde(rename = "_triggers", default, skip_serializing_if = "Option::is_none")]
    pub triggers: Option<String>,

    /// Relative link of the user-defined function feed.
    #[serde(rename = "_udfs", default, skip_serializing_if = "Option::is_none")]
    pub user_defined_functions: Option<String>,

    /// Relative link of the conflict feed.
    #[serde(rename = "_conflicts", default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<String>,
}

impl Collection {
    /// Creates a collection definition with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets the partition key definition.
    #[must_use]
    pub fn with_partition_key(mut self, partition_key: PartitionKey) -> Self {
        self.partition_key = Some(partition_key);
        self
    }
}

/// The operations a trigger fires on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum TriggerOperation {
    /// Every operation.
    #[default]
    All,
    /// Creates.
    Create,
    /// Replaces.
    Replace,
    /// Deletes.
    Delete,
}

/// Whether a trigger runs before or after the operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum TriggerType {
    /// Before the operation.
    #[default]
    Pre,
    /// After the operation.
    Post,
}

/// A server-side trigger.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// The user-assigned id.
    pub id: String,

    /// Service-generated properties.
    #[serde(flatten)]
    pub system: SystemProperties,

    /// JavaScript source.
    #[serde(default)]
    pub body: String,

    /// The operations the trigger fires on.
    #[serde(default)]
    pub trigger_operation: TriggerOperation,

    /// Pre or post.
    #[serde(default)]
    pub trigger_type: TriggerType,
}

/// A stored procedure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StoredProcedure {
    /// The user-assigned id.
    pub id: String,

    /// Service-generated properties.
    #[serde(flatten)]
    pub system: SystemProperties,

    /// JavaScript source.
    #[serde(default)]
    pub body: String,
}

/// A user-defined function.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserDefinedFunction {
    /// The user-assigned id.
    pub id: String,

    /// Service-generated properties.
    #[serde(flatten)]
    pub system: SystemProperties,

    /// JavaScript source.
    #[serde(default)]
    pub body: String,
}

/// A physical partition's key range. Read-only.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartitionKeyRange {
    /// The range id.
    pub id: String,

    /// Service-generated properties.
    #[serde(flatten)]
    pub system: SystemProperties,

    /// Inclusive lower bound of the effective partition key.
    #[serde(default)]
    pub min_inclusive: String,

    /// Exclusive upper bound of the effective partition key.
    #[serde(default)]
    pub max_exclusive: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid_prefix: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_fraction: Option<f64>,

    /// Online or splitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Ids of the ranges this one was split from.
    #[serde(default)]
    pub parents: Vec<String>,
}

impl Resource for Database {
    const KIND: ResourceKind = ResourceKind::DATABASE;

    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.system.etag.as_deref()
    }
}

impl Resource for Collection {
    const KIND: ResourceKind = ResourceKind::COLLECTION;

    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.system.etag.as_deref()
    }
}

impl Resource for Trigger {
    const KIND: ResourceKind = ResourceKind::TRIGGER;

    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.system.etag.as_deref()
    }
}

impl Resource for StoredProcedure {
    const KIND: ResourceKind = ResourceKind::STORED_PROCEDURE;

    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.system.etag.as_deref()
    }
}

impl Resource for UserDefinedFunction {
    const KIND: ResourceKind = ResourceKind::USER_DEFINED_FUNCTION;

    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.system.etag.as_deref()
    }
}

impl Resource for PartitionKeyRange {
    const KIND: ResourceKind = ResourceKind::PARTITION_KEY_RANGE;

    fn id(&self) -> &str {
        &self.id
    }

    fn etag(&self) -> Option<&str> {
        self.system.etag.as_deref()
    }
}

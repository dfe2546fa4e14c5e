//! The generic resource client.
//!
//! One [`ResourceClient<T>`] serves every resource type. It is addressed by
//! the link of the parent entity (the account root for databases, a database
//! for collections, a collection for documents and scripts) and takes the rest
//! from `T::KIND`.
//!
//! Every operation builds a [`CosmosRequest`] and hands it to the shared
//! [`HttpClient`]; this module owns no I/O of its own.
//!
//! # Addressing
//!
//! | Operation | Method | Path                  | Signed link           | Status |
//! |-----------|--------|-----------------------|-----------------------|--------|
//! | create    | POST   | `{parent}/{seg}`      | `{parent}`            | 201    |
//! | get       | GET    | `{parent}/{seg}/{id}` | `{parent}/{seg}/{id}` | 200    |
//! | list      | GET    | `{parent}/{seg}`      | `{parent}`            | 200    |
//! | query     | POST   | `{parent}/{seg}`      | `{parent}`            | 200    |
//! | replace   | PUT    | `{parent}/{seg}/{id}` | `{parent}/{seg}/{id}` | 200    |
//! | delete    | DELETE | `{parent}/{seg}/{id}` | `{parent}/{seg}/{id}` | 204    |

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::auth::{ResourceDescriptor, ResourceId, ResourceLink};
use crate::clients::{
    CosmosError, CosmosRequest, CosmosRequestBuilder, DataType, HttpClient, HttpMethod,
};
use crate::rest::{Cursor, Page, Query, Resource};

/// Per-call options.
///
/// # Example
///
/// ```rust
/// use cosmosdb::rest::RequestOptions;
///
/// let options = RequestOptions::new().partition_key("jim").max_item_count(10);
/// assert_eq!(options.max_item_count, Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Partition key value of the addressed document.
    pub partition_key: Option<Value>,
    /// Page size hint for listings and queries.
    pub max_item_count: Option<u32>,
    /// Makes `create` replace an existing entity with the same id.
    pub upsert: bool,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the partition key value.
    #[must_use]
    pub fn partition_key(mut self, key: impl Into<Value>) -> Self {
        self.partition_key = Some(key.into());
        self
    }

    /// Sets the page size hint.
    #[must_use]
    pub const fn max_item_count(mut self, count: u32) -> Self {
        self.max_item_count = Some(count);
        self
    }

    /// Turns creates into upserts.
    #[must_use]
    pub const fn upsert(mut self, upsert: bool) -> Self {
        self.upsert = upsert;
        self
    }
}

/// Client for the entities of one type under one parent.
///
/// Cloning is cheap; clones share the underlying [`HttpClient`].
pub struct ResourceClient<T> {
    http: Arc<HttpClient>,
    parent: ResourceLink,
    partitioned: bool,
    marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            parent: self.parent.clone(),
            partitioned: self.partitioned,
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("parent", &self.parent)
            .field("partitioned", &self.partitioned)
            .finish_non_exhaustive()
    }
}

impl<T: Resource> ResourceClient<T> {
    /// Creates a client for the `T` entities under `parent`.
    #[must_use]
    pub fn new(http: Arc<HttpClient>, parent: ResourceLink) -> Self {
        Self {
            http,
            parent,
            partitioned: false,
            marker: PhantomData,
        }
    }

    /// Marks the parent collection as partitioned.
    ///
    /// Queries on a partitioned collection without a partition key are sent
    /// as cross-partition queries.
    #[must_use]
    pub const fn partitioned(mut self, partitioned: bool) -> Self {
        self.partitioned = partitioned;
        self
    }

    /// Returns the parent link.
    #[must_use]
    pub const fn parent(&self) -> &ResourceLink {
        &self.parent
    }

    /// Returns `true` if queries may fan out over partitions.
    #[must_use]
    pub const fn is_partitioned(&self) -> bool {
        self.partitioned
    }

    /// Creates an entity.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Status`] with 409 if the id is taken (unless
    /// upserting), or any other executor error.
    pub async fn create(&self, resource: &T, options: &RequestOptions) -> Result<T, CosmosError> {
        let request = self
            .feed_request(HttpMethod::Post, options)
            .expected_status(201)
            .upsert(options.upsert)
            .body(serde_json::to_value(resource)?)
            .build()?;

        let response = self.http.execute(&request).await?;
        response.json()
    }

    /// Reads the entity with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] for an id that cannot be addressed,
    /// [`CosmosError::Status`] with 404 if it does not exist, or any other
    /// executor error.
    pub async fn get(&self, id: &str, options: &RequestOptions) -> Result<T, CosmosError> {
        let request = self
            .item_request(HttpMethod::Get, id, options)?
            .build()?;

        let response = self.http.execute(&request).await?;
        response.json()
    }

    /// Returns a cursor over all entities.
    ///
    /// No request is made until the cursor is advanced.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::InvalidRequest`] if the request cannot be built.
    pub fn list(&self, options: &RequestOptions) -> Result<Cursor<T>, CosmosError> {
        let request = Self::page_size(self.feed_request(HttpMethod::Get, options), options).build()?;
        Ok(Cursor::new(Arc::clone(&self.http), request, T::KIND.list_key))
    }

    /// Reads every page of the feed into one.
    ///
    /// # Errors
    ///
    /// Returns the first error of the underlying cursor.
    pub async fn list_all(&self, options: &RequestOptions) -> Result<Page<T>, CosmosError> {
        self.list(options)?.collect_all().await
    }

    /// Returns a cursor over the results of a query.
    ///
    /// No request is made until the cursor is advanced.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Encoding`] if the query cannot be encoded.
    pub fn query(
        &self,
        query: impl Into<Query>,
        options: &RequestOptions,
    ) -> Result<Cursor<T>, CosmosError> {
        let body = serde_json::to_value(query.into())?;
        let cross_partition = self.partitioned && options.partition_key.is_none();
        let request = Self::page_size(self.feed_request(HttpMethod::Post, options), options)
            .query(cross_partition)
            .body_type(DataType::QueryJson)
            .body(body)
            .build()?;

        Ok(Cursor::new(Arc::clone(&self.http), request, T::KIND.list_key))
    }

    /// Replaces an entity, provided it still carries `resource`'s ETag.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::PreconditionRequired`] without any request if
    /// `resource` has no ETag, [`CosmosError::Status`] with 412 if the ETag
    /// is stale, or any other executor error.
    pub async fn replace(&self, resource: &T, options: &RequestOptions) -> Result<T, CosmosError> {
        let etag = Self::require_etag(resource)?;
        let request = self
            .item_request(HttpMethod::Put, resource.id(), options)?
            .if_match(etag)
            .body(serde_json::to_value(resource)?)
            .build()?;

        let response = self.http.execute(&request).await?;
        response.json()
    }

    /// Deletes an entity, provided it still carries `resource`'s ETag.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::PreconditionRequired`] without any request if
    /// `resource` has no ETag, [`CosmosError::Status`] with 412 if the ETag
    /// is stale, or any other executor error.
    pub async fn delete(&self, resource: &T, options: &RequestOptions) -> Result<(), CosmosError> {
        let etag = Self::require_etag(resource)?;
        let request = self
            .item_request(HttpMethod::Delete, resource.id(), options)?
            .expected_status(204)
            .if_match(etag)
            .build()?;

        self.http.execute(&request).await?;
        Ok(())
    }

    fn require_etag(resource: &T) -> Result<&str, CosmosError> {
        resource
            .etag()
            .filter(|etag| !etag.is_empty())
            .ok_or_else(|| CosmosError::PreconditionRequired {
                resource: T::KIND.name,
                id: resource.id().to_string(),
            })
    }

    /// Starts a request against the feed: path `{parent}/{seg}`, signed with
    /// the parent link.
    fn feed_request(&self, method: HttpMethod, options: &RequestOptions) -> CosmosRequestBuilder {
        let resource_type = T::KIND.resource_type;
        let builder = CosmosRequest::builder(
            method,
            self.parent.feed(resource_type),
            ResourceDescriptor::new(resource_type, self.parent.clone()),
        );
        Self::apply_options(builder, options)
    }

    /// Starts a request against one entity: path and signed link are both
    /// `{parent}/{seg}/{id}`.
    fn item_request(
        &self,
        method: HttpMethod,
        id: &str,
        options: &RequestOptions,
    ) -> Result<CosmosRequestBuilder, CosmosError> {
        let resource_type = T::KIND.resource_type;
        let link = self.parent.item(resource_type, &ResourceId::new(id)?);
        let builder = CosmosRequest::builder(
            method,
            link.to_string(),
            ResourceDescriptor::new(resource_type, link),
        );
        Ok(Self::apply_options(builder, options))
    }

    fn apply_options(
        builder: CosmosRequestBuilder,
        options: &RequestOptions,
    ) -> CosmosRequestBuilder {
        match &options.partition_key {
            Some(key) => builder.partition_key(key.clone()),
            None => builder,
        }
    }

    fn page_size(builder: CosmosRequestBuilder, options: &RequestOptions) -> CosmosRequestBuilder {
        match options.max_item_count {
            Some(count) => builder.max_item_count(count),
            None => builder,
        }
    }
}

// Verify ResourceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceClient<crate::rest::Database>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CosmosConfig, DatabaseAccount, Endpoint, MasterKey};
    use crate::rest::{Collection, Database};

    fn http() -> Arc<HttpClient> {
        let config = CosmosConfig::builder()
            .account(DatabaseAccount::new("testaccount").unwrap())
            .master_key(MasterKey::new("c2VjcmV0").unwrap())
            .endpoint(Endpoint::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        Arc::new(HttpClient::new(&config).unwrap())
    }

    fn db_link() -> ResourceLink {
        ResourceLink::root().item(
            crate::auth::ResourceType::Databases,
            &ResourceId::new("testdb").unwrap(),
        )
    }

    #[test]
    fn test_feed_request_signs_parent_link() {
        let client: ResourceClient<Collection> = ResourceClient::new(http(), db_link());
        let request = client
            .feed_request(HttpMethod::Get, &RequestOptions::default())
            .build()
            .unwrap();

        assert_eq!(request.path, "dbs/testdb/colls");
        assert_eq!(request.descriptor.link.as_ref(), "dbs/testdb");
        assert_eq!(request.descriptor.resource_type.as_str(), "colls");
    }

    #[test]
    fn test_item_request_signs_item_link() {
        let client: ResourceClient<Collection> = ResourceClient::new(http(), db_link());
        let request = client
            .item_request(HttpMethod::Get, "people", &RequestOptions::default())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.path, "dbs/testdb/colls/people");
        assert_eq!(request.descriptor.link.as_ref(), "dbs/testdb/colls/people");
    }

    #[test]
    fn test_item_request_rejects_unaddressable_ids() {
        let client: ResourceClient<Database> = ResourceClient::new(http(), ResourceLink::root());
        let result = client.item_request(HttpMethod::Get, "a/b", &RequestOptions::default());
        assert!(matches!(result, Err(CosmosError::Config(_))));
    }

    #[test]
    fn test_query_headers_follow_partitioning() {
        let client: ResourceClient<Database> =
            ResourceClient::new(http(), ResourceLink::root()).partitioned(true);
        let cross = client
            .query("SELECT * FROM root", &RequestOptions::default())
            .unwrap();
        let scoped = client
            .query("SELECT * FROM root", &RequestOptions::new().partition_key("jim"))
            .unwrap();

        let headers = &cross.request().headers;
        assert!(headers.is_query);
        assert!(headers.enable_cross_partition_query);
        assert_eq!(cross.request().body_type, Some(DataType::QueryJson));

        let headers = &scoped.request().headers;
        assert!(headers.is_query);
        assert!(!headers.enable_cross_partition_query);
        assert_eq!(headers.partition_key, Some(Value::from("jim")));
    }

    #[tokio::test]
    async fn test_missing_etag_fails_before_io() {
        let client: ResourceClient<Database> = ResourceClient::new(http(), ResourceLink::root());
        let database = Database::new("testdb");

        let replace = client.replace(&database, &RequestOptions::default()).await;
        assert!(matches!(
            replace,
            Err(CosmosError::PreconditionRequired { resource: "Database", ref id }) if id == "testdb"
        ));

        let delete = client.delete(&database, &RequestOptions::default()).await;
        assert!(matches!(
            delete,
            Err(CosmosError::PreconditionRequired { .. })
        ));
    }
}

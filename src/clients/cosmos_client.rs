//! Entry point for talking to one Cosmos DB account.

use std::sync::Arc;

use crate::auth::{ResourceId, ResourceLink, ResourceType};
use crate::clients::{CosmosError, HttpClient};
use crate::config::CosmosConfig;
use crate::rest::{
    Collection, Database, PartitionKeyRange, Resource, ResourceClient, StoredProcedure, Trigger,
    UserDefinedFunction,
};

/// Client for one database account.
///
/// Hands out a [`ResourceClient`] per resource type and parent. All of them
/// share one [`HttpClient`], and with it one connection pool and credential.
///
/// # Thread Safety
///
/// `CosmosClient` is `Send + Sync` and cheap to clone.
///
/// # Example
///
/// ```rust,ignore
/// use cosmosdb::{CosmosClient, CosmosConfig, DatabaseAccount, MasterKey};
/// use cosmosdb::rest::{Database, RequestOptions};
///
/// let config = CosmosConfig::builder()
///     .account(DatabaseAccount::new("my-account")?)
///     .master_key(MasterKey::new(&std::env::var("MASTER_KEY")?)?)
///     .build()?;
///
/// let client = CosmosClient::new(&config)?;
/// let db = client
///     .databases()
///     .create(&Database::new("testdb"), &RequestOptions::default())
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct CosmosClient {
    http: Arc<HttpClient>,
}

// Verify CosmosClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CosmosClient>();
};

impl CosmosClient {
    /// Creates a client for the account described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Transport`] if the HTTP client cannot be created.
    pub fn new(config: &CosmosConfig) -> Result<Self, CosmosError> {
        tracing::debug!(
            account = %config.account(),
            endpoint = %config.endpoint(),
            api_version = %config.api_version(),
            "Creating Cosmos DB client"
        );
        Ok(Self::from_http_client(HttpClient::new(config)?))
    }

    /// Creates a client on top of an existing executor.
    #[must_use]
    pub fn from_http_client(http: HttpClient) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    /// Returns the shared executor.
    #[must_use]
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the client for the account's databases.
    #[must_use]
    pub fn databases(&self) -> ResourceClient<Database> {
        ResourceClient::new(Arc::clone(&self.http), ResourceLink::root())
    }

    /// Returns the client for the collections of database `db`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] if `db` cannot be used as an id.
    pub fn collections(&self, db: &str) -> Result<ResourceClient<Collection>, CosmosError> {
        Ok(ResourceClient::new(
            Arc::clone(&self.http),
            Self::database_link(db)?,
        ))
    }

    /// Returns the client for documents of type `T` in collection `coll`.
    ///
    /// The collection is assumed to be partitioned: queries without a
    /// partition key span all partitions.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] if `db` or `coll` cannot be used as an id.
    pub fn documents<T: Resource>(
        &self,
        db: &str,
        coll: &str,
    ) -> Result<ResourceClient<T>, CosmosError> {
        Ok(self.collection_child::<T>(db, coll)?.partitioned(true))
    }

    /// Returns the client for the triggers of collection `coll`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] if `db` or `coll` cannot be used as an id.
    pub fn triggers(&self, db: &str, coll: &str) -> Result<ResourceClient<Trigger>, CosmosError> {
        self.collection_child(db, coll)
    }

    /// Returns the client for the stored procedures of collection `coll`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] if `db` or `coll` cannot be used as an id.
    pub fn stored_procedures(
        &self,
        db: &str,
        coll: &str,
    ) -> Result<ResourceClient<StoredProcedure>, CosmosError> {
        self.collection_child(db, coll)
    }

    /// Returns the client for the user-defined functions of collection `coll`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] if `db` or `coll` cannot be used as an id.
    pub fn user_defined_functions(
        &self,
        db: &str,
        coll: &str,
    ) -> Result<ResourceClient<UserDefinedFunction>, CosmosError> {
        self.collection_child(db, coll)
    }

    /// Returns the client for the partition key ranges of collection `coll`.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] if `db` or `coll` cannot be used as an id.
    pub fn partition_key_ranges(
        &self,
        db: &str,
        coll: &str,
    ) -> Result<ResourceClient<PartitionKeyRange>, CosmosError> {
        self.collection_child(db, coll)
    }

    fn database_link(db: &str) -> Result<ResourceLink, CosmosError> {
        Ok(ResourceLink::root().item(ResourceType::Databases, &ResourceId::new(db)?))
    }

    fn collection_child<T: Resource>(
        &self,
        db: &str,
        coll: &str,
    ) -> Result<ResourceClient<T>, CosmosError> {
        let link = Self::database_link(db)?.item(ResourceType::Collections, &ResourceId::new(coll)?);
        Ok(ResourceClient::new(Arc::clone(&self.http), link))
    }
}

//! Resource access for the Cosmos DB REST API.
//!
//! This module provides one generic execution path for every resource type:
//!
//! - **[`Resource`] trait**: What a type must provide to be addressed
//! - **[`ResourceKind`]**: Per-type tag, path segment and list key
//! - **[`ResourceClient<T>`]**: Create, get, list, query, replace and delete
//! - **[`Cursor<T>`]**: Lazy iteration over paged feeds and queries
//! - **[`Page<T>`]**: One decoded page, with `Deref` to its items
//! - **Models**: [`Database`], [`Collection`], [`Trigger`], [`StoredProcedure`],
//!   [`UserDefinedFunction`] and [`PartitionKeyRange`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb::CosmosClient;
//! use cosmosdb::rest::{Collection, Database, PartitionKey, Query, RequestOptions};
//!
//! let client = CosmosClient::new(&config)?;
//! let options = RequestOptions::default();
//!
//! client.databases().create(&Database::new("testdb"), &options).await?;
//!
//! let collections = client.collections("testdb")?;
//! collections
//!     .create(
//!         &Collection::new("people").with_partition_key(PartitionKey::hash("/id")),
//!         &options,
//!     )
//!     .await?;
//!
//! let people = client.documents::<Person>("testdb", "people")?;
//! let jim = people
//!     .create(&person, &RequestOptions::new().partition_key("jim"))
//!     .await?;
//!
//! let mut cursor = people.query(
//!     Query::new("SELECT * FROM people WHERE people.surname = @surname")
//!         .parameter("@surname", "Minter"),
//!     &options,
//! )?;
//! while let Some(page) = cursor.next().await? {
//!     for person in page.iter() {
//!         println!("{}", person.id);
//!     }
//! }
//! ```

mod client;
mod cursor;
mod models;
mod page;
mod query;
mod resource;

pub use client::{RequestOptions, ResourceClient};
pub use cursor::{Cursor, CursorState};
pub use models::{
    Collection, Database, PartitionKey, PartitionKeyRange, PartitionKind, StoredProcedure,
    SystemProperties, Trigger, TriggerOperation, TriggerType, UserDefinedFunction,
};
pub use page::Page;
pub use query::{Parameter, Query};
pub use resource::{Resource, ResourceKind};

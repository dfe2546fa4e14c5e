//! One page of a feed or query.
//!
//! Feed and query responses share one envelope:
//!
//! ```json
//! {"_rid": "...", "Documents": [ ... ], "_count": 2}
//! ```
//!
//! The key of the entity array depends on the resource kind, so pages are
//! decoded against a [`ResourceKind::list_key`](crate::rest::ResourceKind).
//!
//! [`Page<T>`] implements `Deref<Target = Vec<T>>`, so the items can be used
//! directly:
//!
//! ```rust
//! use cosmosdb::rest::Page;
//!
//! let page = Page::new(2, "rid".to_string(), vec!["a", "b"]);
//! assert_eq!(page.len(), 2);
//! assert_eq!(page[0], "a");
//! ```

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::clients::{CosmosError, CosmosResponse};

/// A decoded batch of entities plus the count and resource id the service
/// reports for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Number of entities in the page (`_count`).
    pub count: u64,
    /// Resource id of the feed's parent (`_rid`).
    pub resource_id: String,
    /// The entities.
    pub items: Vec<T>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "_count", default)]
    count: u64,
    #[serde(rename = "_rid", default)]
    resource_id: String,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(0, String::new(), Vec::new())
    }
}

impl<T> Page<T> {
    /// Creates a page.
    #[must_use]
    pub const fn new(count: u64, resource_id: String, items: Vec<T>) -> Self {
        Self {
            count,
            resource_id,
            items,
        }
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }

    /// Appends `other` to this page.
    ///
    /// Counts are summed, the later resource id wins and items are
    /// concatenated in order.
    pub fn merge(&mut self, other: Self) {
        self.count += other.count;
        self.resource_id = other.resource_id;
        self.items.extend(other.items);
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decodes a page from a feed or query response body.
    ///
    /// A missing entity array decodes as an empty page.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Encoding`] if the body is not a page envelope
    /// or its entities do not decode into `T`.
    pub fn from_response(response: &CosmosResponse, list_key: &str) -> Result<Self, CosmosError> {
        let mut envelope: Envelope = response.json()?;
        let items = match envelope.rest.remove(list_key) {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };

        Ok(Self::new(envelope.count, envelope.resource_id, items))
    }
}

impl<T> Deref for Page<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for Page<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(body: &str) -> CosmosResponse {
        CosmosResponse::new(200, HashMap::new(), body.as_bytes().to_vec())
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: String,
    }

    #[test]
    fn test_decodes_envelope_by_list_key() {
        let page: Page<Named> = Page::from_response(
            &response(r#"{"_rid":"","Databases":[{"id":"a"},{"id":"b"}],"_count":2}"#),
            "Databases",
        )
        .unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.resource_id, "");
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].id, "b");
    }

    #[test]
    fn test_missing_list_key_is_an_empty_page() {
        let page: Page<Named> =
            Page::from_response(&response(r#"{"_rid":"x","_count":0}"#), "Documents").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.resource_id, "x");
    }

    #[test]
    fn test_undecodable_items_are_encoding_errors() {
        let result: Result<Page<Named>, _> = Page::from_response(
            &response(r#"{"Documents":[{"name":"no id"}],"_count":1}"#),
            "Documents",
        );
        assert!(matches!(result, Err(CosmosError::Encoding(_))));
    }

    #[test]
    fn test_merge_aggregates_pages() {
        let mut all = Page::default();
        all.merge(Page::new(2, "r1".to_string(), vec![1, 2]));
        all.merge(Page::new(1, "r2".to_string(), vec![3]));

        assert_eq!(all.count, 3);
        assert_eq!(all.resource_id, "r2");
        assert_eq!(all.into_inner(), vec![1, 2, 3]);
    }
}

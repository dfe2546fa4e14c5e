//! Lazy, forward-only iteration over paged feeds and queries.
//!
//! The service pages large results and hands out an opaque continuation
//! token with every page but the last. A [`Cursor`] threads that token from
//! each response into the next request, so callers only see pages.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cursor = client.databases().list(&RequestOptions::default())?;
//! while let Some(page) = cursor.next().await? {
//!     for database in page.iter() {
//!         println!("{}", database.id);
//!     }
//! }
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::clients::{CosmosError, CosmosRequest, HttpClient};
use crate::rest::Page;

/// Where a [`Cursor`] stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// More pages may follow; `continuation` resumes after the last page read.
    Ready {
        /// Token for the next request, `None` before the first page.
        continuation: Option<String>,
    },
    /// The service reported the last page.
    Exhausted,
}

/// A sequence of pages fetched one request at a time.
///
/// Each call to [`Cursor::next`] issues exactly one request (plus any
/// throttling retries). Once the service answers without a continuation
/// token the cursor is exhausted for good, and further calls return
/// `Ok(None)` without touching the network.
///
/// A failed call leaves the cursor where it was, so `next` may simply be
/// called again.
#[derive(Debug)]
pub struct Cursor<T> {
    client: Arc<HttpClient>,
    request: CosmosRequest,
    list_key: &'static str,
    state: CursorState,
    marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Cursor<T> {
    /// Creates a cursor at the start of the feed addressed by `request`.
    ///
    /// `list_key` names the entity array in each page.
    #[must_use]
    pub fn new(client: Arc<HttpClient>, request: CosmosRequest, list_key: &'static str) -> Self {
        Self {
            client,
            request,
            list_key,
            state: CursorState::Ready { continuation: None },
            marker: PhantomData,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &CursorState {
        &self.state
    }

    /// Returns the request each page is fetched with, minus its continuation.
    #[must_use]
    pub const fn request(&self) -> &CosmosRequest {
        &self.request
    }

    /// Returns `true` once the last page has been read.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.state, CursorState::Exhausted)
    }

    /// Fetches the next page, or `None` at the end of the sequence.
    ///
    /// # Errors
    ///
    /// Returns the executor's error unchanged, or [`CosmosError::Encoding`]
    /// if the page does not decode. The cursor's state is not changed.
    pub async fn next(&mut self) -> Result<Option<Page<T>>, CosmosError> {
        let request = match &self.state {
            CursorState::Exhausted => return Ok(None),
            CursorState::Ready { continuation } => {
                self.request.with_continuation(continuation.as_deref())
            }
        };

        let response = self.client.execute(&request).await?;
        let page = Page::from_response(&response, self.list_key)?;

        self.state = match response.continuation {
            Some(token) => CursorState::Ready {
                continuation: Some(token),
            },
            None => CursorState::Exhausted,
        };

        tracing::trace!(
            path = %self.request.path,
            count = page.count,
            exhausted = self.is_exhausted(),
            "Fetched page"
        );

        Ok(Some(page))
    }

    /// Drains the cursor into one page.
    ///
    /// Counts are summed, the last resource id is kept and items are
    /// concatenated in order.
    ///
    /// # Errors
    ///
    /// Returns the first error of [`Cursor::next`].
    pub async fn collect_all(mut self) -> Result<Page<T>, CosmosError> {
        let mut all = Page::default();
        while let Some(page) = self.next().await? {
            all.merge(page);
        }
        Ok(all)
    }
}

// Verify Cursor is Send at compile time
const _: fn() = || {
    const fn assert_send<T: Send>() {}
    assert_send::<Cursor<serde_json::Value>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ResourceDescriptor, ResourceLink, ResourceType};
    use crate::clients::HttpMethod;
    use crate::config::{CosmosConfig, DatabaseAccount, Endpoint, MasterKey};
    use serde_json::Value;

    fn cursor() -> Cursor<Value> {
        let config = CosmosConfig::builder()
            .account(DatabaseAccount::new("testaccount").unwrap())
            .master_key(MasterKey::new("c2VjcmV0").unwrap())
            .endpoint(Endpoint::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        let request = CosmosRequest::builder(
            HttpMethod::Get,
            "dbs",
            ResourceDescriptor::new(ResourceType::Databases, ResourceLink::root()),
        )
        .build()
        .unwrap();

        Cursor::new(
            Arc::new(HttpClient::new(&config).unwrap()),
            request,
            "Databases",
        )
    }

    #[test]
    fn test_cursor_starts_ready_without_token() {
        let cursor = cursor();
        assert_eq!(
            cursor.state(),
            &CursorState::Ready { continuation: None }
        );
        assert!(!cursor.is_exhausted());
    }

    #[tokio::test]
    async fn test_exhausted_cursor_returns_none_without_io() {
        let mut cursor = cursor();
        cursor.state = CursorState::Exhausted;

        assert!(cursor.next().await.unwrap().is_none());
        assert!(cursor.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_state_unchanged() {
        let mut cursor = cursor();
        cursor.state = CursorState::Ready {
            continuation: Some("token-2".to_string()),
        };

        let result = cursor.next().await;
        assert!(matches!(result, Err(CosmosError::Transport(_))));
        assert_eq!(
            cursor.state(),
            &CursorState::Ready {
                continuation: Some("token-2".to_string())
            }
        );
    }
}

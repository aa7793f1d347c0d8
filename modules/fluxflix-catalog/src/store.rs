//! The document store behind the catalog.
//!
//! Documents are keyed by an opaque id that the store assigns on insert.
//! Listing returns documents in the store's own order, which for both
//! adapters in this crate is insertion order.

use async_trait::async_trait;

use fluxflix_common::Movie;

use crate::error::Result;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a new movie document. The store assigns the id.
    async fn save(&self, title: &str) -> Result<Movie>;

    async fn find_all(&self) -> Result<Vec<Movie>>;

    /// Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>>;

    /// Returns `true` if a document was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;

    /// Returns the number of removed documents.
    async fn delete_all(&self) -> Result<u64>;

    async fn count(&self) -> Result<u64>;
}

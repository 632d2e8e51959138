//! Database abstraction traits
//!
//! This module defines the collection operations an upsert needs, so the
//! loader can run against MongoDB or an in-memory collection.

use crate::domain::errors::UpsertError;
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

/// A single collection of documents
///
/// Implementations classify backend failures into [`UpsertError`] kinds;
/// rejected credentials must surface as [`UpsertError::AuthenticationFailed`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Atomically replace the first record matching `filter`
    ///
    /// The replaced record keeps its `_id`.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(_id))` of the replaced record, `Ok(None)` if nothing matched.
    async fn find_one_and_replace(
        &self,
        filter: Document,
        replacement: &Document,
    ) -> Result<Option<Bson>, UpsertError>;

    /// Insert a new record
    ///
    /// # Returns
    ///
    /// Returns the `_id` assigned to the new record.
    async fn insert_one(&self, document: &Document) -> Result<Bson, UpsertError>;

    /// `database.collection` name used in log records
    fn namespace(&self) -> String;
}

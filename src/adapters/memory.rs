//! In-memory collection
//!
//! Backs `--dry-run` and the tests. It mirrors the MongoDB behaviors the
//! loader relies on: `_id` generation, replacement keeping `_id`, duplicate
//! `_id` rejection and the immutable `_id` rule.

use crate::adapters::database::traits::DocumentStore;
use crate::domain::errors::UpsertError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// MongoDB duplicate key error code
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB `ImmutableField` error code
const IMMUTABLE_FIELD_CODE: i32 = 66;

/// Collection held in process memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    namespace: String,
    records: Mutex<Vec<Document>>,
}

impl MemoryStore {
    /// Create an empty collection named `database.collection`
    pub fn new(database: &str, collection: &str) -> Self {
        Self {
            namespace: format!("{database}.{collection}"),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Copy of every stored record
    pub fn documents(&self) -> Vec<Document> {
        self.lock().clone()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Document>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn matches_filter(record: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| record.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one_and_replace(
        &self,
        filter: Document,
        replacement: &Document,
    ) -> Result<Option<Bson>, UpsertError> {
        let mut records = self.lock();
        let Some(record) = records.iter_mut().find(|r| matches_filter(r, &filter)) else {
            return Ok(None);
        };

        let id = record.get("_id").cloned().unwrap_or(Bson::Null);
        if let Some(new_id) = replacement.get("_id") {
            if *new_id != id {
                return Err(UpsertError::OperationFailed {
                    code: Some(IMMUTABLE_FIELD_CODE),
                    message: "Performing an update on the path '_id' would modify the immutable field '_id'"
                        .to_string(),
                });
            }
        }

        let mut replaced = Document::new();
        replaced.insert("_id", id.clone());
        for (key, value) in replacement.iter().filter(|(key, _)| key.as_str() != "_id") {
            replaced.insert(key.clone(), value.clone());
        }
        *record = replaced;

        Ok(Some(id))
    }

    async fn insert_one(&self, document: &Document) -> Result<Bson, UpsertError> {
        let mut records = self.lock();
        let id = document
            .get("_id")
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));

        if records.iter().any(|r| r.get("_id") == Some(&id)) {
            return Err(UpsertError::OperationFailed {
                code: Some(DUPLICATE_KEY_CODE),
                message: format!(
                    "E11000 duplicate key error collection: {} index: _id_ dup key: {{ _id: {} }}",
                    self.namespace, id
                ),
            });
        }

        let mut stored = Document::new();
        stored.insert("_id", id.clone());
        for (key, value) in document.iter().filter(|(key, _)| key.as_str() != "_id") {
            stored.insert(key.clone(), value.clone());
        }
        records.push(stored);

        Ok(id)
    }

    fn namespace(&self) -> String {
        self.namespace.clone()
    }
}

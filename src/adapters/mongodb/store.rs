//! MongoDB collection adapter implementing [`DocumentStore`]

use crate::adapters::database::traits::DocumentStore;
use crate::domain::errors::UpsertError;
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use mongodb::error::{Error, ErrorKind, WriteFailure};
use mongodb::Collection;

/// MongoDB implementation of [`DocumentStore`]
#[derive(Debug, Clone)]
pub struct MongoCollectionStore {
    collection: Collection<Document>,
}

impl MongoCollectionStore {
    /// Wrap a driver collection handle
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl DocumentStore for MongoCollectionStore {
    async fn find_one_and_replace(
        &self,
        filter: Document,
        replacement: &Document,
    ) -> Result<Option<Bson>, UpsertError> {
        let previous = self
            .collection
            .find_one_and_replace(filter, replacement)
            .await
            .map_err(classify_error)?;

        Ok(previous.and_then(|document| document.get("_id").cloned()))
    }

    async fn insert_one(&self, document: &Document) -> Result<Bson, UpsertError> {
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(classify_error)?;

        Ok(result.inserted_id)
    }

    fn namespace(&self) -> String {
        self.collection.namespace().to_string()
    }
}

/// Map a driver error to an upsert error kind
///
/// Driver authentication errors and the server's auth-failure codes become
/// [`UpsertError::AuthenticationFailed`]; everything else is an operation failure.
pub fn classify_error(error: Error) -> UpsertError {
    match error.kind.as_ref() {
        ErrorKind::Authentication { message, .. } => {
            UpsertError::AuthenticationFailed(message.clone())
        }
        ErrorKind::Command(command) => {
            UpsertError::from_code(Some(command.code), command.message.clone())
        }
        ErrorKind::Write(WriteFailure::WriteError(write)) => {
            UpsertError::from_code(Some(write.code), write.message.clone())
        }
        _ => UpsertError::OperationFailed {
            code: None,
            message: error.to_string(),
        },
    }
}

//! Upsert of a single document
//!
//! Finds the record matching the document's search key values and replaces
//! it, or inserts the document when nothing matches. One attempt per
//! document: failures are logged and returned, never retried.

use crate::adapters::database::DocumentStore;
use crate::domain::errors::UpsertError;
use crate::domain::{SearchKeys, UpsertOutcome};
use mongodb::bson::Document;

/// Replace the record matching `search_keys`, or insert `document`
///
/// # Errors
///
/// - [`UpsertError::MissingSearchKey`] if a key is absent from the document;
///   nothing is written.
/// - [`UpsertError::AuthenticationFailed`] if the store rejects the credentials.
/// - [`UpsertError::OperationFailed`] for any other store failure.
pub async fn upsert<S>(
    store: &S,
    document: &Document,
    search_keys: &SearchKeys,
) -> Result<UpsertOutcome, UpsertError>
where
    S: DocumentStore + ?Sized,
{
    let filter = search_keys.filter_for(document)?;

    let result = match store.find_one_and_replace(filter, document).await {
        Ok(Some(id)) => Ok(UpsertOutcome::updated(id)),
        Ok(None) => store.insert_one(document).await.map(UpsertOutcome::inserted),
        Err(e) => Err(e),
    };

    match &result {
        Ok(outcome) => tracing::debug!(
            namespace = %store.namespace(),
            id = %outcome.id,
            updated = outcome.was_update,
            "Document upserted"
        ),
        Err(UpsertError::AuthenticationFailed(message)) => tracing::error!(
            namespace = %store.namespace(),
            error = %message,
            "Authentication failed"
        ),
        Err(e) => tracing::error!(
            namespace = %store.namespace(),
            error = %e,
            "Operation failed"
        ),
    }

    result
}

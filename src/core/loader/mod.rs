//! Collection loading
//!
//! Drives the upsert of every document in a YAML file, strictly in file
//! order and one at a time, and tallies the outcome into a [`LoadSummary`].
//! The first failure aborts the load; no partial summary is returned.

pub mod summary;

pub use summary::LoadSummary;

use crate::adapters::database::DocumentStore;
use crate::core::upsert::upsert;
use crate::core::yaml::read_yaml;
use crate::domain::errors::UpsertError;
use crate::domain::result::Result;
use crate::domain::SearchKeys;
use crate::log_load_start;
use std::path::Path;
use tokio::time::Instant;

/// Upsert every document of the YAML file at `path` into `store`
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, or on the first
/// document that fails to upsert. Counts reached so far are logged before
/// the error is returned.
pub async fn load_collection<S>(
    path: impl AsRef<Path>,
    store: &S,
    search_keys: &SearchKeys,
) -> Result<LoadSummary>
where
    S: DocumentStore + ?Sized,
{
    let path = path.as_ref();
    let started = Instant::now();
    let mut summary = LoadSummary::new(path.display().to_string());

    log_load_start!(path.display(), store.namespace(), search_keys);

    let documents = read_yaml(path)?;
    tracing::debug!(count = documents.len(), "Documents read");

    for (index, document) in documents.iter().enumerate() {
        match upsert(store, document, search_keys).await {
            Ok(outcome) => summary.record(&outcome),
            Err(e) => {
                if let UpsertError::AuthenticationFailed(_) = e {
                    tracing::error!(
                        processed = summary.total,
                        "Credentials rejected, aborting load"
                    );
                } else {
                    tracing::error!(
                        index,
                        document = %document,
                        error = %e,
                        "Failed to upsert document"
                    );
                }
                tracing::warn!(
                    processed = summary.total,
                    inserted = summary.inserted,
                    updated = summary.updated,
                    remaining = documents.len() - index,
                    "Load aborted"
                );
                return Err(e.into());
            }
        }
    }

    Ok(summary.with_duration(started.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::errors::Yaml2MongoError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn keys(names: &[&str]) -> SearchKeys {
        SearchKeys::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[tokio::test]
    async fn test_load_counts_inserts() {
        let file = yaml_file("- name: a\n- name: b\n- name: c\n");
        let store = MemoryStore::new("db", "items");

        let summary = load_collection(file.path(), &store, &keys(&["name"]))
            .await
            .unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.inserted, 3);
        assert_eq!(summary.updated, 0);
        assert!(summary.is_consistent());
        assert_eq!(summary.filename, file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_load_keeps_file_order() {
        let file = yaml_file("- name: b\n- name: a\n");
        let store = MemoryStore::new("db", "items");

        load_collection(file.path(), &store, &keys(&["name"]))
            .await
            .unwrap();

        let names: Vec<String> = store
            .documents()
            .iter()
            .map(|d| d.get_str("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_duplicate_keys_in_file_update() {
        let file = yaml_file("- name: a\n  v: 1\n- name: a\n  v: 2\n");
        let store = MemoryStore::new("db", "items");

        let summary = load_collection(file.path(), &store, &keys(&["name"]))
            .await
            .unwrap();

        assert_eq!((summary.total, summary.inserted, summary.updated), (2, 1, 1));
        assert_eq!(store.documents()[0].get_i32("v").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_key_aborts_after_earlier_documents() {
        let file = yaml_file("- name: a\n- other: b\n- name: c\n");
        let store = MemoryStore::new("db", "items");

        let err = load_collection(file.path(), &store, &keys(&["name"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Yaml2MongoError::Upsert(UpsertError::MissingSearchKey { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let store = MemoryStore::new("db", "items");
        let err = load_collection("no/such/file.yaml", &store, &keys(&["name"]))
            .await
            .unwrap_err();

        assert!(matches!(err, Yaml2MongoError::Io(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_empty_file() {
        let file = yaml_file("");
        let store = MemoryStore::new("db", "items");

        let summary = load_collection(file.path(), &store, &keys(&["name"]))
            .await
            .unwrap();
        assert_eq!(summary.total, 0);
    }
}

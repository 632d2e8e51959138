//! Document-level domain types
//!
//! Documents are plain BSON documents parsed from YAML. This module holds the
//! search keys that identify a document and the outcome of upserting one.

use crate::domain::errors::UpsertError;
use mongodb::bson::{Bson, Document};
use std::fmt;

/// Ordered list of field names identifying a record
///
/// Duplicates are kept but have no effect on the resulting filter.
///
/// # Examples
///
/// ```
/// use yaml2mongo::domain::SearchKeys;
/// use mongodb::bson::doc;
///
/// let keys = SearchKeys::new(vec!["name".to_string()]).unwrap();
/// let filter = keys.filter_for(&doc! { "name": "a", "size": 3 }).unwrap();
/// assert_eq!(filter, doc! { "name": "a" });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKeys(Vec<String>);

impl SearchKeys {
    /// Creates a key set, rejecting an empty list or blank names
    pub fn new(keys: Vec<String>) -> Result<Self, String> {
        if keys.is_empty() {
            return Err("At least one search key is required".to_string());
        }
        if keys.iter().any(|k| k.trim().is_empty()) {
            return Err("Search keys cannot be empty".to_string());
        }
        Ok(Self(keys))
    }

    /// Builds the lookup filter `{key: document[key]}` for every key
    ///
    /// # Errors
    ///
    /// Returns [`UpsertError::MissingSearchKey`] for the first key absent from
    /// the document.
    pub fn filter_for(&self, document: &Document) -> Result<Document, UpsertError> {
        let mut filter = Document::new();
        for key in &self.0 {
            let value = document
                .get(key)
                .ok_or_else(|| UpsertError::MissingSearchKey { key: key.clone() })?;
            filter.insert(key.clone(), value.clone());
        }
        Ok(filter)
    }

    /// Number of keys, duplicates included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed key set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SearchKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl TryFrom<Vec<String>> for SearchKeys {
    type Error = String;

    fn try_from(keys: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

/// Result of upserting a single document
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    /// `_id` of the affected record
    pub id: Bson,

    /// True if an existing record was replaced, false if a new one was inserted
    pub was_update: bool,
}

impl UpsertOutcome {
    /// Outcome of replacing an existing record
    pub fn updated(id: Bson) -> Self {
        Self {
            id,
            was_update: true,
        }
    }

    /// Outcome of inserting a new record
    pub fn inserted(id: Bson) -> Self {
        Self {
            id,
            was_update: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn keys(names: &[&str]) -> SearchKeys {
        SearchKeys::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_search_keys_rejects_empty() {
        assert!(SearchKeys::new(vec![]).is_err());
        assert!(SearchKeys::new(vec!["  ".to_string()]).is_err());
    }

    #[test]
    fn test_filter_for_multiple_keys() {
        let document = doc! { "region": "eu", "name": "alpha", "size": 3 };
        let filter = keys(&["name", "region"]).filter_for(&document).unwrap();

        assert_eq!(filter, doc! { "name": "alpha", "region": "eu" });
    }

    #[test]
    fn test_filter_for_duplicate_keys() {
        let document = doc! { "name": "alpha" };
        let filter = keys(&["name", "name"]).filter_for(&document).unwrap();

        assert_eq!(filter, doc! { "name": "alpha" });
    }

    #[test]
    fn test_filter_for_nested_value() {
        let document = doc! { "ref": { "system": "a", "code": 1 } };
        let filter = keys(&["ref"]).filter_for(&document).unwrap();

        assert_eq!(filter, doc! { "ref": { "system": "a", "code": 1 } });
    }

    #[test]
    fn test_filter_for_missing_key() {
        let document = doc! { "name": "alpha" };
        let err = keys(&["name", "id"]).filter_for(&document).unwrap_err();

        assert_eq!(
            err,
            UpsertError::MissingSearchKey {
                key: "id".to_string()
            }
        );
    }

    #[test]
    fn test_search_keys_display() {
        assert_eq!(keys(&["a", "b"]).to_string(), "a,b");
    }

    #[test]
    fn test_upsert_outcome_constructors() {
        assert!(UpsertOutcome::updated(Bson::Int32(1)).was_update);
        assert!(!UpsertOutcome::inserted(Bson::Int32(1)).was_update);
    }
}

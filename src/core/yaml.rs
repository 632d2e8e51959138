//! YAML data file reader
//!
//! Turns a YAML file into an ordered list of BSON documents. Accepted layouts:
//!
//! ```yaml
//! # a sequence of mappings
//! - name: alpha
//!   size: 1
//! - name: beta
//!   size: 2
//! ```
//!
//! a single mapping, or a `---` separated stream of either. Empty stream
//! documents are skipped and `<<` merge keys are applied.

use crate::domain::errors::Yaml2MongoError;
use crate::domain::result::Result;
use mongodb::bson::Document;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;

/// Read a YAML file into documents, in file order
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read and a YAML error if it
/// is malformed or contains an entry that is not a mapping with string keys.
pub fn read_yaml(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Yaml2MongoError::Io(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_yaml(&contents).map_err(|e| match e {
        Yaml2MongoError::Yaml(message) => {
            Yaml2MongoError::Yaml(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Parse YAML text into documents, in order
pub fn parse_yaml(contents: &str) -> Result<Vec<Document>> {
    let mut documents = Vec::new();

    for stream_document in serde_yaml::Deserializer::from_str(contents) {
        let mut value = Value::deserialize(stream_document)?;
        // `<<: *anchor` merge keys, nested ones included
        value
            .apply_merge()
            .map_err(|e| Yaml2MongoError::Yaml(format!("invalid merge key: {e}")))?;

        match value {
            Value::Null => {}
            Value::Sequence(entries) => {
                for entry in entries {
                    let index = documents.len();
                    documents.push(to_document(entry, index)?);
                }
            }
            value @ Value::Mapping(_) => {
                let index = documents.len();
                documents.push(to_document(value, index)?);
            }
            other => {
                return Err(Yaml2MongoError::Yaml(format!(
                    "expected a sequence of mappings, found {}",
                    kind(&other)
                )))
            }
        }
    }

    Ok(documents)
}

fn to_document(value: Value, index: usize) -> Result<Document> {
    if !value.is_mapping() {
        return Err(Yaml2MongoError::Yaml(format!(
            "entry {index} is {}, expected a mapping",
            kind(&value)
        )));
    }

    serde_yaml::from_value(value)
        .map_err(|e| Yaml2MongoError::Yaml(format!("entry {index} is not a valid document: {e}")))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, Bson};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_sequence_in_order() {
        let documents = parse_yaml(
            r#"
- name: alpha
  size: 1
- name: beta
  size: 2
"#,
        )
        .unwrap();

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].get_str("name").unwrap(), "alpha");
        assert_eq!(documents[1].get_str("name").unwrap(), "beta");
    }

    #[test]
    fn test_parse_value_types() {
        let documents = parse_yaml(
            r#"
- text: hello
  flag: true
  ratio: 0.5
  missing: ~
  tags: [a, b]
  nested:
    inner: x
"#,
        )
        .unwrap();

        let document = &documents[0];
        assert_eq!(document.get_str("text").unwrap(), "hello");
        assert!(document.get_bool("flag").unwrap());
        assert_eq!(document.get_f64("ratio").unwrap(), 0.5);
        assert_eq!(document.get("missing"), Some(&Bson::Null));
        assert_eq!(
            document.get_array("tags").unwrap(),
            &vec![Bson::String("a".into()), Bson::String("b".into())]
        );
        assert_eq!(document.get_document("nested").unwrap(), &doc! { "inner": "x" });
    }

    #[test]
    fn test_parse_single_mapping() {
        let documents = parse_yaml("name: alpha\n").unwrap();
        assert_eq!(documents.len(), 1);
    }

    #[test]
    fn test_parse_multi_document_stream() {
        let documents = parse_yaml("- name: a\n---\nname: b\n---\n").unwrap();
        let names: Vec<&str> = documents
            .iter()
            .map(|d| d.get_str("name").unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_merge_key() {
        let documents = parse_yaml(
            r#"
- &base
  sku: A
  color: red
- <<: *base
  sku: B
"#,
        )
        .unwrap();

        assert_eq!(documents[1], doc! { "sku": "B", "color": "red" });
        assert!(!documents[1].contains_key("<<"));
    }

    #[test]
    fn test_parse_nested_merge_key() {
        let documents = parse_yaml(
            r#"
defaults: &defaults
  unit: kg
item:
  <<: *defaults
  weight: 3
"#,
        )
        .unwrap();

        assert_eq!(
            documents[0].get_document("item").unwrap(),
            &doc! { "weight": 3, "unit": "kg" }
        );
    }

    #[test]
    fn test_parse_invalid_merge_value() {
        let err = parse_yaml("- <<: 42
  sku: A
").unwrap_err();
        assert!(err.to_string().contains("invalid merge key"));
    }

    #[test]
    fn test_parse_yaml_1_2_scalars_stay_strings() {
        let documents = parse_yaml("since: 2024-01-02
active: yes
").unwrap();
        assert_eq!(
            documents[0],
            doc! { "since": "2024-01-02", "active": "yes" }
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_yaml("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_scalar_entry_rejected() {
        let err = parse_yaml("- name: a\n- 42\n").unwrap_err();
        assert!(err.to_string().contains("entry 1 is a number"));
    }

    #[test]
    fn test_parse_top_level_scalar_rejected() {
        let err = parse_yaml("just text").unwrap_err();
        assert!(err.to_string().contains("found a string"));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_yaml("- name: [unclosed"),
            Err(Yaml2MongoError::Yaml(_))
        ));
    }

    #[test]
    fn test_read_yaml_missing_file() {
        let err = read_yaml("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, Yaml2MongoError::Io(_)));
    }

    #[test]
    fn test_read_yaml_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"- name: alpha\n").unwrap();
        temp_file.flush().unwrap();

        let documents = read_yaml(temp_file.path()).unwrap();
        assert_eq!(documents, vec![doc! { "name": "alpha" }]);
    }
}

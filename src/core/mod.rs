//! Core business logic for yaml2mongo.
//!
//! # Modules
//!
//! - [`yaml`] - Reads a YAML data file into BSON documents
//! - [`upsert`] - Find-and-replace by search keys, else insert
//! - [`loader`] - Loads a whole file and reports a [`LoadSummary`](loader::LoadSummary)
//! - [`timer`] - Stopwatch with named accumulation
//!
//! # Example
//!
//! ```rust
//! use yaml2mongo::adapters::memory::MemoryStore;
//! use yaml2mongo::core::loader::load_collection;
//! use yaml2mongo::domain::SearchKeys;
//! use std::io::Write;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = tempfile::NamedTempFile::new()?;
//! writeln!(file, "- sku: A-1\n  qty: 3\n- sku: B-2\n  qty: 5")?;
//!
//! let store = MemoryStore::new("inventory", "products");
//! let keys = SearchKeys::new(vec!["sku".to_string()])?;
//! let summary = load_collection(file.path(), &store, &keys).await?;
//!
//! assert_eq!(summary.inserted, 2);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod timer;
pub mod upsert;
pub mod yaml;

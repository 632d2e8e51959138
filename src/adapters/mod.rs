//! External system integrations for yaml2mongo.
//!
//! - [`database`] - Collection abstraction ([`DocumentStore`](database::DocumentStore))
//! - [`mongodb`] - MongoDB implementation and connection URI handling
//! - [`memory`] - In-memory implementation for dry runs and tests
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the driver and enable
//! testing without a running server:
//!
//! ```rust
//! use yaml2mongo::adapters::database::DocumentStore;
//! use yaml2mongo::adapters::memory::MemoryStore;
//! use yaml2mongo::core::upsert::upsert;
//! use yaml2mongo::domain::SearchKeys;
//! use mongodb::bson::doc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new("inventory", "products");
//! let keys = SearchKeys::new(vec!["sku".to_string()])?;
//! let outcome = upsert(&store, &doc! { "sku": "A-1", "qty": 3 }, &keys).await?;
//! assert!(!outcome.was_update);
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod mongodb;

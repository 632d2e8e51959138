//! Database abstraction layer
//!
//! This module provides a trait-based abstraction for collection operations,
//! allowing the loader to work with MongoDB or the in-memory collection.

pub mod traits;

pub use traits::DocumentStore;

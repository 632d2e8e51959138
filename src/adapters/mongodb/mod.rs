//! MongoDB adapter
//!
//! - [`uri`] resolves the connection URI template
//! - [`client`] opens the connection
//! - [`store`] implements [`DocumentStore`](crate::adapters::database::DocumentStore)
//!   over a collection

pub mod client;
pub mod store;
pub mod uri;

pub use client::MongoDbClient;
pub use store::{classify_error, MongoCollectionStore};
pub use uri::{encode_credential, resolve_uri};

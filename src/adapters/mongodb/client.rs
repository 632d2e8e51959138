//! MongoDB client implementation
//!
//! This module opens the client connection and hands out collection stores.

use super::store::{classify_error, MongoCollectionStore};
use crate::config::{MongoDbConfig, SecretString};
use crate::domain::errors::UpsertError;
use crate::domain::{Result, Yaml2MongoError};
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use secrecy::ExposeSecret;

/// MongoDB client for yaml2mongo
///
/// Connection pooling, authentication and reconnection are left to the driver.
#[derive(Debug, Clone)]
pub struct MongoDbClient {
    client: Client,
}

impl MongoDbClient {
    /// Create a new client from a resolved connection URI
    ///
    /// # Arguments
    ///
    /// * `uri` - Connection URI with credentials already substituted
    /// * `config` - Client settings from the application configuration
    ///
    /// # Errors
    ///
    /// Returns a connection error if the URI is invalid, the client cannot be
    /// created, or (with `verify_connection`) the server does not answer a ping.
    pub async fn connect(uri: &SecretString, config: &MongoDbConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(uri.expose_secret().as_str())
            .await
            .map_err(|e| {
                Yaml2MongoError::Connection(format!("Invalid connection URI: {e}"))
            })?;

        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(config.connect_timeout());
        options.server_selection_timeout = Some(config.server_selection_timeout());

        let client = Client::with_options(options).map_err(|e| {
            Yaml2MongoError::Connection(format!("Failed to create MongoDB client: {e}"))
        })?;

        let client = Self { client };
        if config.verify_connection {
            client.test_connection().await?;
        }

        Ok(client)
    }

    /// Test the connection by pinging the server
    ///
    /// Rejected credentials surface as [`Yaml2MongoError::Authentication`].
    pub async fn test_connection(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ping_error(classify_error(e)))?;

        tracing::debug!("MongoDB ping succeeded");
        Ok(())
    }

    /// Store for `database.collection`
    pub fn collection(&self, database: &str, collection: &str) -> MongoCollectionStore {
        MongoCollectionStore::new(
            self.client
                .database(database)
                .collection::<Document>(collection),
        )
    }
}

fn ping_error(error: UpsertError) -> Yaml2MongoError {
    match error {
        UpsertError::AuthenticationFailed(message) => Yaml2MongoError::Authentication(message),
        other => Yaml2MongoError::Connection(format!("Connection test failed: {other}")),
    }
}

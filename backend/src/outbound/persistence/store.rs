//! MongoDB client handle shared by the persistence adapters.
//!
//! [`MongoStore`] owns the driver client and the selected database. The
//! client is internally pooled and safe to clone across actix workers, so a
//! single store is built at startup and handed to every adapter.

use std::time::Duration;

use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Database};
use tracing::debug;

/// Errors that can occur while opening or probing the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string or client options were rejected.
    #[error("invalid store configuration: {message}")]
    Config { message: String },

    /// The deployment did not answer the initial ping.
    #[error("store is unreachable: {message}")]
    Unreachable { message: String },
}

impl StoreError {
    /// Create a configuration error with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unreachable error with the given message.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Configuration for the MongoDB client.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use person_api::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database("golang")
///     .with_collection("people")
///     .with_connect_timeout(Duration::from_secs(10));
/// assert_eq!(config.collection(), "people");
/// ```
#[derive(Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
    collection: String,
    connect_timeout: Duration,
    app_name: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("uri", &self.uri)
            .field("database", &self.database)
            .field("collection", &self.collection)
            .field("connect_timeout", &self.connect_timeout)
            .field("app_name", &self.app_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl StoreConfig {
    /// Create a configuration for the deployment at `uri`.
    ///
    /// Uses these defaults:
    /// - `database`: `golang`
    /// - `collection`: `people`
    /// - `connect_timeout`: 10 seconds
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: "golang".to_owned(),
            collection: "people".to_owned(),
            connect_timeout: Duration::from_secs(10),
            app_name: None,
            username: None,
            password: None,
        }
    }

    /// Authenticate as `username`, passed to the driver as a credential
    /// rather than embedded in the URI.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    /// User the client authenticates as, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Select the database holding the person collection.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Select the person collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Bound connection establishment and server selection.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Name reported to the server in the connection handshake.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Person collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    async fn client_options(&self) -> Result<ClientOptions, StoreError> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|err| StoreError::config(err.to_string()))?;
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.connect_timeout);
        if self.app_name.is_some() {
            options.app_name = self.app_name.clone();
        }
        if self.username.is_some() {
            options.credential = Some(
                Credential::builder()
                    .username(self.username.clone())
                    .password(self.password.clone())
                    .build(),
            );
        }
        Ok(options)
    }
}

/// Connected MongoDB deployment.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    database: Database,
    collection: String,
}

impl MongoStore {
    /// Build a client from `config` and ping the database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URI cannot be parsed and
    /// [`StoreError::Unreachable`] if the ping fails within the connect
    /// timeout.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let options = config.client_options().await?;
        let client =
            Client::with_options(options).map_err(|err| StoreError::config(err.to_string()))?;
        let store = Self {
            database: client.database(&config.database),
            client,
            collection: config.collection,
        };
        store.ping().await?;
        debug!(
            database = store.database.name(),
            collection = %store.collection,
            "connected to store"
        );
        Ok(store)
    }

    /// Round-trip a `ping` command to the selected database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unreachable`] if the command fails.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| StoreError::unreachable(err.to_string()))
    }

    /// Typed handle on the person collection.
    pub fn collection<T: Send + Sync>(&self) -> Collection<T> {
        self.database.collection(&self.collection)
    }

    /// Untyped handle on the person collection, used for index commands.
    pub fn raw_collection(&self) -> Collection<Document> {
        self.collection()
    }

    /// Selected database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Close pooled connections and stop background monitoring.
    ///
    /// Must be called after every request using the store has completed.
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn store_config_default_values() {
        let config = StoreConfig::new("mongodb://localhost:27017");

        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database(), "golang");
        assert_eq!(config.collection(), "people");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.app_name.is_none());
    }

    #[rstest]
    fn store_config_builder_pattern() {
        let config = StoreConfig::new("mongodb://db:27018")
            .with_database("people_db")
            .with_collection("persons")
            .with_connect_timeout(Duration::from_millis(250))
            .with_app_name("person-api");

        assert_eq!(config.database(), "people_db");
        assert_eq!(config.collection(), "persons");
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.app_name.as_deref(), Some("person-api"));
    }

    #[rstest]
    #[tokio::test]
    async fn credentials_are_passed_as_driver_credential() {
        let config = StoreConfig::new("mongodb://db:27017")
            .with_credentials("p@ss:user", Some("s3cr/t@".to_owned()));

        let options = config.client_options().await.expect("options");

        let credential = options.credential.expect("credential set");
        assert_eq!(credential.username.as_deref(), Some("p@ss:user"));
        assert_eq!(credential.password.as_deref(), Some("s3cr/t@"));
        assert!(!format!("{config:?}").contains("s3cr/t@"));
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_config_sets_no_credential() {
        let options = StoreConfig::new("mongodb://db:27017")
            .client_options()
            .await
            .expect("options");

        assert!(options.credential.is_none());
        assert_eq!(options.connect_timeout, Some(Duration::from_secs(10)));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_uri_is_a_config_error() {
        let err = MongoStore::connect(StoreConfig::new("postgres://localhost"))
            .await
            .expect_err("scheme is rejected");

        assert!(matches!(err, StoreError::Config { .. }), "{err:?}");
    }

    #[rstest]
    fn store_error_display() {
        assert!(
            StoreError::config("bad scheme")
                .to_string()
                .contains("bad scheme")
        );
        assert!(
            StoreError::unreachable("no servers")
                .to_string()
                .contains("no servers")
        );
    }
}

//! Process settings loaded via OrthoConfig and the HTTP server configuration
//! object built from them.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use person_api::outbound::persistence::StoreConfig;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 1234);
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_MONGO_HOST: &str = "localhost";
const DEFAULT_MONGO_PORT: u16 = 27017;
const DEFAULT_DATABASE: &str = "golang";
const DEFAULT_COLLECTION: &str = "people";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_INDEX_TIMEOUT_MS: u64 = 10_000;

/// HTTP listener settings (`SERVER_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Deadline for each store call made while serving a request.
    pub request_timeout_ms: Option<u64>,
}

impl ServerSettings {
    /// Configured listen address, falling back to `0.0.0.0:1234`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured per-request store deadline, falling back to five seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }
}

/// Document store settings (`MONGO_*`).
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MONGO")]
pub struct StoreSettings {
    /// Username; the driver connects anonymously when unset.
    pub user: Option<String>,
    /// Password for `user`.
    pub password: Option<String>,
    /// Store host name.
    pub host: Option<String>,
    /// Store port.
    pub port: Option<u16>,
    /// Database holding the person collection.
    pub database: Option<String>,
    /// Person collection.
    pub collection: Option<String>,
    /// Bound on connection establishment and the startup ping.
    pub connect_timeout_ms: Option<u64>,
    /// Server-side time budget for index creation.
    pub index_timeout_ms: Option<u64>,
}

impl std::fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings")
            .field("uri", &self.uri())
            .field("user", &self.user)
            .field("database", &self.database())
            .field("collection", &self.collection())
            .finish_non_exhaustive()
    }
}

impl StoreSettings {
    /// Store host, falling back to `localhost`.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_MONGO_HOST)
    }

    /// Store port, falling back to `27017`.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_MONGO_PORT)
    }

    /// Database name, falling back to `golang`.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Collection name, falling back to `people`.
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// Connect timeout, falling back to ten seconds.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms.unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS))
    }

    /// Index creation budget, falling back to ten seconds.
    pub fn index_timeout(&self) -> Duration {
        Duration::from_millis(self.index_timeout_ms.unwrap_or(DEFAULT_INDEX_TIMEOUT_MS))
    }

    /// Connection string `mongodb://host:port`.
    ///
    /// Credentials never appear here; [`Self::store_config`] hands them to
    /// the driver separately, so the URI is safe to log.
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}", self.host(), self.port())
    }

    /// Client configuration for the persistence adapters.
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(self.uri())
            .with_database(self.database())
            .with_collection(self.collection())
            .with_connect_timeout(self.connect_timeout())
            .with_app_name(env!("CARGO_PKG_NAME"));
        match &self.user {
            Some(user) => config.with_credentials(user.clone(), self.password.clone()),
            None => config,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) request_timeout: Duration,
}

impl ServerConfig {
    /// Construct a server configuration from the loaded settings.
    #[must_use]
    pub fn new(settings: &ServerSettings) -> Self {
        Self {
            bind_addr: settings.bind_addr(),
            request_timeout: settings.request_timeout(),
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

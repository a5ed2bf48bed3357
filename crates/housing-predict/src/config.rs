//! Server configuration.
//!
//! Plain data with defaults for a local frontend on port 3000; the binary fills these
//! from its command line and environment.
use std::net::SocketAddr;
use std::path::PathBuf;
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

/// Where the model artifact is looked for when no path is configured
pub const DEFAULT_MODEL_PATH: &str = "ml_model/california_housing_model.safetensors";

/// Origins allowed to call the API when none are configured
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:8080",
];

/// Origin entry allowing every origin
pub const ANY_ORIGIN: &str = "*";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CorsConfig {
    /// Exact origins allowed to make cross-origin requests
    pub allowed_origins: Vec<String>,
    /// Whether cookies and authorization headers may be sent
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    /// Build the CORS layer.
    ///
    /// Methods and headers mirror the request, which is what a `*` wildcard means once
    /// credentials are allowed. A `*` origin mirrors the request origin for the same
    /// reason. Origins that are not valid header values are skipped.
    pub fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.allow_origin())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(self.allow_credentials)
    }

    fn allow_origin(&self) -> AllowOrigin {
        if self.allowed_origins.iter().any(|origin| origin.trim() == ANY_ORIGIN) {
            return AllowOrigin::mirror_request();
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Path of the safetensors model artifact
    pub model_path: PathBuf,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// The address to bind
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidAddress`] if `host:port` is not a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

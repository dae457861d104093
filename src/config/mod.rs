// Configuration module entry point
// Layers defaults, an optional TOML file, environment and command line

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

use crate::error::Error;

// Re-export public types
pub use state::AppState;
pub use types::{Config, ConfigOverrides, HttpConfig, LoggingConfig, ServerConfig};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_NAME: &str = "devserve";

/// Prefix for environment overrides, e.g. `DEVSERVE_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "DEVSERVE";

impl Config {
    /// Load configuration.
    ///
    /// An explicit `config_path` must exist; otherwise `devserve.toml` in the
    /// working directory is used when present.
    pub fn load_from(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, config::ConfigError> {
        let file = match config_path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.keep_alive", true)?
            .set_default("logging.access_log", true)?
            .set_default("http.server_name", concat!("devserve/", env!("CARGO_PKG_VERSION")))?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", overrides.host.clone())?
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve `server.host`/`server.port` to a bindable address
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let target = (self.server.host.as_str(), self.server.port);
        target
            .to_socket_addrs()
            .map_err(|e| Error::Address(format!("{}:{}: {e}", self.server.host, self.server.port)))?
            .next()
            .ok_or_else(|| Error::Address(format!("{}:{}", self.server.host, self.server.port)))
    }
}

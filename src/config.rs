//! Environment-driven configuration.
//!
//! Three knobs, all from the process environment, all with defaults:
//!
//! | Variable  | Default       |                                          |
//! |-----------|---------------|------------------------------------------|
//! | `HOST`    | `0.0.0.0`     | bind address                             |
//! | `PORT`    | `3000`        | bind port                                |
//! | `APP_ENV` | `development` | `production` hides 500 message detail    |
//!
//! No config file, no reload. Read once at startup.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::Error;

/// Server configuration, read from the environment at process start.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub app_env: String,
}

impl Config {
    /// Reads `HOST`, `PORT` and `APP_ENV` from the environment, falling
    /// back to the defaults above.
    pub fn load() -> Result<Self, Error> {
        let settings = Self::defaults(config::Config::builder())?
            .add_source(config::Environment::default())
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        builder
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("app_env", "development")
    }

    /// The address to bind, from `host` and `port`.
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }

    /// Whether 500 responses may carry the underlying error text.
    ///
    /// Everything except `production` is treated as a development-style
    /// environment where the detail helps more than it leaks.
    pub fn expose_errors(&self) -> bool {
        self.app_env != "production"
    }
}

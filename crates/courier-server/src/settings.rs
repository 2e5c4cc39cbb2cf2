//! Server configuration.
//!
//! Values come from built-in defaults, an optional `courier-server.toml` in
//! the working directory, and `COURIER_*` environment variables, with later
//! sources overriding earlier ones.

use serde::Deserialize;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:4200";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Browser origin allowed by CORS, or `*` for any.
    pub allowed_origin: String,
}

impl ServerConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("courier-server").required(false))
                .add_source(config::Environment::with_prefix("COURIER")),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("allowed_origin", DEFAULT_ALLOWED_ORIGIN)?
            .add_source(builder.build()?)
            .build()?
            .try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

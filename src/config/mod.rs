// Configuration module entry point
// Loads layered configuration (file, environment, defaults) into typed structs

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig, UploadConfig};

impl Config {
    /// Load configuration from the default `config.toml` next to the binary
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Missing files are fine; defaults and `SERVER_*` environment variables
    /// still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8888)?
            .set_default("logging.access_log", true)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("upload.slot_path", "/tmp/test.png")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

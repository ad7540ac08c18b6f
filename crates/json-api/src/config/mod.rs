//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, logging::LoggingConfig, server::ServerRuntimeConfig,
    telemetry::TelemetryConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod server;
pub(crate) mod telemetry;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// OpenTelemetry export settings.
    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn flattened_groups_parse_from_arguments() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--database-url",
            "postgresql://localhost/storefront",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.database.database_url, "postgresql://localhost/storefront");
        assert!(
            config.logging.log_format == logging::LogFormat::Json,
            "expected json log format"
        );
        assert!(!config.telemetry.enabled, "span export is opt-in");

        Ok(())
    }
}

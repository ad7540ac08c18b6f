//! Telemetry Config
//!
//! OTLP span export. Disabled unless `OTEL_ENABLED=true`.

use clap::Args;

/// OpenTelemetry export settings.
#[derive(Debug, Args)]
pub struct TelemetryConfig {
    /// Export spans over OTLP
    #[arg(long = "otel-enabled", env = "OTEL_ENABLED", default_value_t = false)]
    pub enabled: bool,

    /// Continue traces from an incoming `traceparent` header
    #[arg(
        long = "otel-parent-propagation",
        env = "OTEL_PARENT_PROPAGATION_ENABLED",
        default_value_t = false
    )]
    pub parent_propagation: bool,

    /// OTLP gRPC collector endpoint
    #[arg(
        long = "otel-endpoint",
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub endpoint: String,

    /// Export timeout in seconds
    #[arg(
        long = "otel-timeout-seconds",
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3
    )]
    pub timeout_seconds: u64,

    /// `service.name` resource attribute
    #[arg(
        long = "otel-service-name",
        env = "OTEL_SERVICE_NAME",
        default_value = "storefront-json"
    )]
    pub service_name: String,

    /// `deployment.environment.name` resource attribute
    #[arg(
        long = "otel-environment",
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: String,

    /// Fraction of root traces sampled, 0.0 to 1.0
    #[arg(
        long = "otel-sample-ratio",
        env = "OTEL_TRACE_SAMPLE_RATIO",
        default_value_t = 1.0
    )]
    pub sample_ratio: f64,
}

impl TelemetryConfig {
    /// Parent extraction only applies when spans are exported.
    #[must_use]
    pub fn propagates_parent(&self) -> bool {
        self.enabled && self.parent_propagation
    }
}

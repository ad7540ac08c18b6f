//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{ServerConfig, logging::LogFormat};

use super::ObservabilityError;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Transport and exporter crates that are chatty at `info`.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tower", "tonic", "opentelemetry", "sqlx"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.telemetry.service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(env_filter(&config.logging.log_level))
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_ignored| EnvFilter::new(directives(log_level)))
}

fn directives(log_level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(log_level.to_string(), |mut directives, target| {
            directives.push(',');
            directives.push_str(target);
            directives.push_str("=warn");
            directives
        })
}

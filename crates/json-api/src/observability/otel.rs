//! OTLP tracer provider.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::telemetry::TelemetryConfig;

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    telemetry: &TelemetryConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(telemetry.endpoint.clone())
        .with_timeout(Duration::from_secs(telemetry.timeout_seconds))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(telemetry.sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(telemetry))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(telemetry: &TelemetryConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(telemetry.service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            KeyValue::new(
                "deployment.environment.name",
                telemetry.environment.clone(),
            ),
        ])
        .build()
}

/// Follow the caller's sampling decision, otherwise sample by ratio.
fn sampler(sample_ratio: f64) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(clamp_ratio(
        sample_ratio,
    ))))
}

fn clamp_ratio(sample_ratio: f64) -> f64 {
    if sample_ratio.is_nan() {
        return 1.0;
    }

    sample_ratio.clamp(0.0, 1.0)
}

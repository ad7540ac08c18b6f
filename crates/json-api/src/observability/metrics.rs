//! Prometheus metrics and the `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const LATENCY_BUCKETS: [f64; 11] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

#[derive(Debug)]
struct StorefrontMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    cart_mutations_total: IntCounterVec,
}

static METRICS: OnceLock<Option<StorefrontMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static StorefrontMetrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

/// Keeps the in-flight gauge raised for as long as it is alive.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static StorefrontMetrics>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let metrics = metrics();

        if let Some(metrics) = metrics {
            metrics.requests_in_flight.inc();
        }

        Self(metrics)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(metrics) = self.0 {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a cart change by operation (`add`, `update`, `remove`, `clear`) and
/// whether the service accepted it.
pub(crate) fn record_cart_mutation(operation: &str, succeeded: bool) {
    let Some(metrics) = metrics() else {
        return;
    };

    let outcome = if succeeded { "ok" } else { "rejected" };

    metrics
        .cart_mutations_total
        .with_label_values(&[operation, outcome])
        .inc();
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    let encoder = TextEncoder::new();
    let mut body = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut body) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    if let Ok(content_type) = HeaderValue::from_str(encoder.format_type()) {
        res.headers_mut().insert(CONTENT_TYPE, content_type);
    }

    res.render(String::from_utf8_lossy(&body).into_owned());
}

fn register<C>(registry: &Registry, collector: C) -> Option<C>
where
    C: Collector + Clone + 'static,
{
    match registry.register(Box::new(collector.clone())) {
        Ok(()) => Some(collector),
        Err(source) => {
            error!("failed to register metric: {source}");
            None
        }
    }
}

fn build_metrics() -> Option<StorefrontMetrics> {
    let registry = Registry::new_custom(Some("storefront_json".to_string()), None)
        .inspect_err(|source| error!("failed to create metrics registry: {source}"))
        .ok()?;

    let requests_total = IntCounterVec::new(
        Opts::new(
            "http_requests_total",
            "HTTP requests by method, route and status code.",
        ),
        &["method", "route", "status_code"],
    )
    .inspect_err(|source| error!("failed to create requests counter: {source}"))
    .ok()?;

    let request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency by method and route.",
        )
        .buckets(LATENCY_BUCKETS.to_vec()),
        &["method", "route"],
    )
    .inspect_err(|source| error!("failed to create latency histogram: {source}"))
    .ok()?;

    let requests_in_flight = IntGauge::new(
        "http_requests_in_flight",
        "HTTP requests currently being served.",
    )
    .inspect_err(|source| error!("failed to create in-flight gauge: {source}"))
    .ok()?;

    let cart_mutations_total = IntCounterVec::new(
        Opts::new(
            "cart_mutations_total",
            "Cart changes by operation and outcome.",
        ),
        &["operation", "outcome"],
    )
    .inspect_err(|source| error!("failed to create cart mutation counter: {source}"))
    .ok()?;

    Some(StorefrontMetrics {
        requests_total: register(&registry, requests_total)?,
        request_duration_seconds: register(&registry, request_duration_seconds)?,
        requests_in_flight: register(&registry, requests_in_flight)?,
        cart_mutations_total: register(&registry, cart_mutations_total)?,
        registry,
    })
}

//! Request logging hoop: request ids, the `http.request` span, access log
//! lines and HTTP metrics.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();
    let _in_flight = metrics::InFlightRequestGuard::track();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::set_request_id_header(res, &request_id);
    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    let method = req.method().to_string();
    let route = spans::route_template(req.uri().path());

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %spans::span_name(&method, route),
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %route,
        path = %req.uri().path(),
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach remote parent to request span: {source}");
    }

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let status = res.status_code.unwrap_or(StatusCode::OK);
    let elapsed = started.elapsed();

    metrics::observe_request(&method, route, status.as_u16(), elapsed.as_secs_f64());

    span.in_scope(|| log_completion(&span, status, elapsed));
}

fn log_completion(span: &Span, status: StatusCode, elapsed: Duration) {
    let status = status.as_u16();
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    let threshold_ms = settings::slow_request_threshold_ms();

    span.record("status", status);
    span.record("duration_ms", duration_ms);

    match status {
        500.. => error!(status, duration_ms, "request failed"),
        400..=499 => warn!(status, duration_ms, "request rejected"),
        _ => info!(status, duration_ms, "request completed"),
    }

    if duration_ms > threshold_ms {
        warn!(duration_ms, threshold_ms, "slow request");
    }
}

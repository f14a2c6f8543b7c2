use std::time::Duration;

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{runtime, trace::TracerProvider};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Latency buckets for a storefront API: catalog reads sit in the low
/// milliseconds, checkout holds a transaction and lands in the tail.
const LATENCY_BUCKETS: &[f64] = &[
    0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
];

/// Sets up the tracing subscriber (fmt + `RUST_LOG` filter, plus an
/// OTLP span exporter when `OTEL_EXPORTER_OTLP_ENDPOINT` is set) and
/// installs the Prometheus recorder. The returned handle renders the
/// `/metrics` page. Panics if called twice; it runs once at startup.
pub fn init() -> PrometheusHandle {
    let otel_layer =
        otlp_tracer().map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));
    let otel_enabled = otel_layer.is_some();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .init();

    if otel_enabled {
        tracing::info!("OpenTelemetry span export enabled");
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .expect("bucket list is non-empty")
        .install_recorder()
        .expect("telemetry initialized twice");

    metrics::describe_counter!(
        "http_requests_total",
        "Requests served, by method, path and status"
    );
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "Wall-clock request latency in seconds"
    );

    handle
}

fn otlp_tracer() -> Option<opentelemetry_sdk::trace::Tracer> {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
    {
        Ok(exporter) => exporter,
        Err(err) => {
            eprintln!("Ignoring OTLP endpoint {endpoint}: {err}");
            return None;
        }
    };

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .build();
    let tracer = provider.tracer("kirana-server");
    opentelemetry::global::set_tracer_provider(provider);

    Some(tracer)
}

pub fn track_request(method: &str, path: &str, status: u16, elapsed: Duration) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(elapsed.as_secs_f64());
}

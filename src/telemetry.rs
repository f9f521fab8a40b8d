use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppConfig;

/// Keeps the OTLP tracer provider alive until the service stops.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            match provider.shutdown() {
                Ok(()) => tracing::info!("OpenTelemetry tracer provider shut down"),
                Err(e) => tracing::warn!(error = ?e, "failed to shut down tracer provider"),
            }
        }
    }
}

/// JSON logs filtered by `RUST_LOG` (default `info`), plus span export
/// over OTLP when telemetry is enabled.
pub fn init(config: &AppConfig) -> anyhow::Result<TelemetryGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if !config.telemetry_enabled {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?;
        return Ok(TelemetryGuard { provider: None });
    }

    let resource = Resource::builder_empty()
        .with_attribute(KeyValue::new(SERVICE_NAME, config.telemetry_service_name.clone()))
        .with_attribute(KeyValue::new(SERVICE_VERSION, config.telemetry_service_version.clone()))
        .with_attribute(KeyValue::new(
            "deployment.environment.name",
            config.telemetry_environment.clone(),
        ))
        .build();

    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.telemetry_otlp_endpoint)
        .build()?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(config.telemetry_service_name.clone());
    opentelemetry::global::set_tracer_provider(provider.clone());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()?;

    tracing::info!(
        service = %config.telemetry_service_name,
        endpoint = %config.telemetry_otlp_endpoint,
        "OpenTelemetry initialized"
    );

    Ok(TelemetryGuard {
        provider: Some(provider),
    })
}

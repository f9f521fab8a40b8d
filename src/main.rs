use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusBuilder;

use demohub_notifications::config::AppConfig;
use demohub_notifications::repository::memory::InMemoryNotificationRepository;
use demohub_notifications::repository::seed::sample_notifications;
use demohub_notifications::{build_router, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    let telemetry = telemetry::init(&config)?;

    tracing::info!("starting the notifications service");
    tracing::info!(telemetry_enabled = config.telemetry_enabled, "config loaded");

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install Prometheus recorder")?;
    metrics_process::Collector::default().describe();
    tracing::info!("prometheus metrics initialized");

    let repository = if config.seed_sample_data {
        tracing::info!("seeding sample notifications");
        InMemoryNotificationRepository::with_notifications(sample_notifications(Utc::now()))
    } else {
        InMemoryNotificationRepository::new()
    };

    let shared_state = Arc::new(AppState::new(
        repository,
        config.event_channel_capacity,
        Some(metrics_handle),
    ));
    let router = build_router(shared_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(bind_addr = %config.bind_addr, "notifications service running");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("notifications service stopped");
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

pub mod config;
pub mod delivery;
pub mod domain;
pub mod repository;
pub mod telemetry;
pub mod usecase;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::delivery::http::v1::notifications::{
    clear_notifications, create_notification, delete_notification, get_notification_stats,
    list_notifications, list_unread_notifications, mark_all_as_read, mark_as_read,
};
use crate::delivery::http::v1::preferences::{get_preferences, update_preferences};
use crate::delivery::http::v1::ws::notification_events_handler;
use crate::repository::memory::InMemoryNotificationRepository;
use crate::usecase::notifications::NotificationsUseCase;
use crate::usecase::preferences::PreferencesUseCase;
use crate::usecase::system::{SystemClock, UuidV7IdGenerator};

pub struct AppState {
    pub notifications_usecase:
        NotificationsUseCase<InMemoryNotificationRepository, SystemClock, UuidV7IdGenerator>,
    pub preferences_usecase: PreferencesUseCase<InMemoryNotificationRepository>,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires both use cases to the same session store and event channel.
    pub fn new(
        repository: InMemoryNotificationRepository,
        event_channel_capacity: usize,
        metrics_handle: Option<PrometheusHandle>,
    ) -> Self {
        let (events, _) = broadcast::channel(event_channel_capacity);

        Self {
            notifications_usecase: NotificationsUseCase::new(
                repository.clone(),
                SystemClock,
                UuidV7IdGenerator,
                events.clone(),
            ),
            preferences_usecase: PreferencesUseCase::new(repository, events),
            metrics_handle,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let notifications_api = Router::new()
        .route(
            "/api/v1/notifications",
            get(list_notifications)
                .post(create_notification)
                .delete(clear_notifications),
        )
        .route("/api/v1/notifications/unread", get(list_unread_notifications))
        .route("/api/v1/notifications/stats", get(get_notification_stats))
        .route("/api/v1/notifications/read-all", post(mark_all_as_read))
        .route(
            "/api/v1/notifications/preferences",
            get(get_preferences).patch(update_preferences),
        )
        .route("/api/v1/notifications/ws", get(notification_events_handler))
        .route("/api/v1/notifications/{id}", delete(delete_notification))
        .route("/api/v1/notifications/{id}/read", post(mark_as_read));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .merge(notifications_api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn metrics(State(state): State<Arc<AppState>>) -> String {
    match &state.metrics_handle {
        Some(handle) => {
            metrics_process::Collector::default().collect();
            handle.render()
        }
        None => String::new(),
    }
}

#[tracing::instrument]
async fn healthz() -> &'static str {
    "OK"
}

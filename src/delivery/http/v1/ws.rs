use std::sync::Arc;

use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use axum::extract::ws::{Message, WebSocket};
use chrono::{Local, NaiveTime};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::domain::event::NotificationEvent;
use crate::domain::preferences::NotificationPreferences;
use crate::AppState;

pub async fn notification_events_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    // Subscribe before upgrading so nothing published during the handshake is lost.
    let rx = state.notifications_usecase.subscribe();

    tracing::info!("notification event subscriber connecting");
    ws.on_upgrade(move |socket| handle_socket(socket, rx, state))
}

async fn handle_socket(
    socket: WebSocket,
    mut rx: broadcast::Receiver<NotificationEvent>,
    state: Arc<AppState>,
) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    tracing::info!("notification event subscriber connected");

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Ok(event) => {
                        if !should_forward(&event, &state).await {
                            tracing::debug!("event suppressed by notification preferences");
                            continue;
                        }

                        let payload = match serde_json::to_string(&event) {
                            Ok(payload) => payload,
                            Err(e) => {
                                tracing::error!(error = %e, "failed to serialize notification event");
                                continue;
                            }
                        };

                        if ws_sender.send(Message::Text(payload.into())).await.is_err() {
                            tracing::info!("WS send failed, client disconnected");
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "WS client lagged, some events were skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::debug!("event channel closed");
                        break;
                    }
                }
            }
            msg = ws_receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("notification event subscriber disconnected");
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "WS receive error");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

async fn should_forward(event: &NotificationEvent, state: &AppState) -> bool {
    if !matches!(event, NotificationEvent::Added { .. }) {
        return true;
    }

    match state.preferences_usecase.get_preferences().await {
        Ok(preferences) => is_deliverable(event, &preferences, Local::now().time()),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load preferences, delivering event");
            true
        }
    }
}

/// New notifications respect the alert toggles and the do-not-disturb
/// window; every other change is always delivered.
pub fn is_deliverable(
    event: &NotificationEvent,
    preferences: &NotificationPreferences,
    time: NaiveTime,
) -> bool {
    match event {
        NotificationEvent::Added { notification } => {
            preferences.should_deliver(notification.notification_type, time)
        }
        _ => true,
    }
}

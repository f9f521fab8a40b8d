use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::domain::notification::{NewNotification, NotificationType};
use crate::usecase::error::UsecaseError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    pub unread_only: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub message: String,
    pub read: bool,
    #[validate(length(max = 2048))]
    pub action_url: Option<String>,
    #[validate(length(max = 100))]
    pub action_label: Option<String>,
    #[validate(length(max = 64))]
    pub icon: Option<String>,
}

impl From<CreateNotificationRequest> for NewNotification {
    fn from(request: CreateNotificationRequest) -> Self {
        Self {
            notification_type: request.notification_type,
            title: request.title,
            message: request.message,
            read: request.read,
            action_url: request.action_url,
            action_label: request.action_label,
            icon: request.icon,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling list notifications request");

    let notifications = if params.unread_only.unwrap_or(false) {
        state.notifications_usecase.list_unread().await?
    } else {
        state.notifications_usecase.list_all().await?
    };

    Ok((StatusCode::OK, Json(notifications)))
}

#[tracing::instrument(skip(state))]
pub async fn list_unread_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling list unread notifications request");

    let notifications = state.notifications_usecase.list_unread().await?;
    Ok((StatusCode::OK, Json(notifications)))
}

#[tracing::instrument(skip(state))]
pub async fn get_notification_stats(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UsecaseError> {
    let stats = state.notifications_usecase.get_stats().await?;
    Ok((StatusCode::OK, Json(stats)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_notification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling create notification request");

    if let Err(validation_errors) = payload.validate() {
        tracing::warn!(?validation_errors, "validation failed");
        return Err(UsecaseError::Validation(format!("Validation error: {}", validation_errors)));
    }

    let notification = state.notifications_usecase.add(payload.into()).await?;

    tracing::debug!(notification_id = %notification.id, "notification created successfully");
    Ok((StatusCode::CREATED, Json(notification)))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn mark_as_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    state.notifications_usecase.mark_as_read(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn mark_all_as_read(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UsecaseError> {
    state.notifications_usecase.mark_all_as_read().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    state.notifications_usecase.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
pub async fn clear_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UsecaseError> {
    state.notifications_usecase.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str) -> CreateNotificationRequest {
        serde_json::from_value(serde_json::json!({
            "type": "demo_request",
            "title": title,
            "read": false,
        }))
        .unwrap()
    }

    #[test]
    fn test_create_request_validation() {
        assert!(request("New Demo Request").validate().is_ok());
        assert!(request("").validate().is_err());
        assert!(request(&"x".repeat(201)).validate().is_err());
    }

    #[test]
    fn test_create_request_requires_read_flag() {
        let result = serde_json::from_value::<CreateNotificationRequest>(serde_json::json!({
            "type": "info",
            "title": "Hello",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_request_converts() {
        let new: NewNotification = request("Hello").into();

        assert_eq!(new.notification_type, NotificationType::DemoRequest);
        assert_eq!(new.message, "");
        assert!(new.action_url.is_none());
    }
}

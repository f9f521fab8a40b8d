use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::domain::preferences::PreferencesUpdate;
use crate::usecase::error::UsecaseError;
use crate::AppState;

#[tracing::instrument(skip(state))]
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("getting notification preferences");

    let preferences = state.preferences_usecase.get_preferences().await?;
    Ok((StatusCode::OK, Json(preferences)))
}

#[tracing::instrument(skip(state, body))]
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PreferencesUpdate>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!(?body, "updating notification preferences");

    let preferences = state.preferences_usecase.update_preferences(&body).await?;
    Ok((StatusCode::OK, Json(preferences)))
}

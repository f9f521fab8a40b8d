use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    domain::notification::{Notification, NotificationStats},
    domain::preferences::{NotificationPreferences, PreferencesUpdate},
    repository::errors::RepositoryError,
    usecase::contracts::{NotificationRepository, PreferencesRepository},
};

#[derive(Debug, Default)]
struct SessionState {
    notifications: Vec<Notification>,
    preferences: NotificationPreferences,
}

/// Session-scoped store holding the notification feed and the
/// preferences record. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<SessionState>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// `notifications` must already be newest first.
    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState {
                notifications,
                preferences: NotificationPreferences::default(),
            })),
        }
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Notification>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.notifications.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn list_unread(&self) -> Result<Vec<Notification>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.notifications.iter().filter(|n| !n.read).cloned().collect())
    }

    #[tracing::instrument(skip(self))]
    async fn stats(&self) -> Result<NotificationStats, RepositoryError> {
        let state = self.state.read().await;
        Ok(NotificationStats::from_notifications(&state.notifications))
    }

    #[tracing::instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn prepend(&self, notification: &Notification) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state.notifications.insert(0, notification.clone());

        tracing::debug!(total = state.notifications.len(), "notification stored");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    async fn mark_as_read(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;

        match state.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.read => {
                notification.read = true;
                Ok(true)
            }
            Some(_) => Ok(false),
            None => {
                tracing::debug!("notification not found, ignoring");
                Ok(false)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn mark_all_as_read(&self) -> Result<usize, RepositoryError> {
        let mut state = self.state.write().await;

        let mut changed = 0;
        for notification in state.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }

        Ok(changed)
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;

        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id);
        let removed = state.notifications.len() != before;

        if !removed {
            tracing::debug!("notification not found, ignoring");
        }
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    async fn clear(&self) -> Result<usize, RepositoryError> {
        let mut state = self.state.write().await;
        let removed = state.notifications.len();
        state.notifications.clear();
        Ok(removed)
    }
}

impl PreferencesRepository for InMemoryNotificationRepository {
    #[tracing::instrument(skip(self))]
    async fn get(&self) -> Result<NotificationPreferences, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.preferences.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, update: &PreferencesUpdate) -> Result<NotificationPreferences, RepositoryError> {
        let mut state = self.state.write().await;
        update.apply(&mut state.preferences);
        Ok(state.preferences.clone())
    }
}

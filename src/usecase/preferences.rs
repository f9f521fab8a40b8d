use tokio::sync::broadcast;

use crate::domain::event::NotificationEvent;
use crate::domain::preferences::{NotificationPreferences, PreferencesUpdate};
use crate::usecase::contracts::PreferencesRepository;
use crate::usecase::error::UsecaseError;

pub struct PreferencesUseCase<P: PreferencesRepository> {
    preferences_repository: P,
    events: broadcast::Sender<NotificationEvent>,
}

impl<P: PreferencesRepository> PreferencesUseCase<P> {
    pub fn new(preferences_repository: P, events: broadcast::Sender<NotificationEvent>) -> Self {
        Self {
            preferences_repository,
            events,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_preferences(&self) -> Result<NotificationPreferences, UsecaseError> {
        let preferences = self.preferences_repository.get().await?;

        tracing::debug!(?preferences, "preferences loaded");
        Ok(preferences)
    }

    /// Shallow merge: only the fields present in `update` change.
    #[tracing::instrument(skip(self))]
    pub async fn update_preferences(
        &self,
        update: &PreferencesUpdate,
    ) -> Result<NotificationPreferences, UsecaseError> {
        if update.is_empty() {
            tracing::debug!("empty preferences update, nothing to merge");
            return self.get_preferences().await;
        }

        let preferences = self.preferences_repository.update(update).await?;

        metrics::counter!("notification_preferences_updated_total").increment(1);
        tracing::info!("notification preferences updated");

        if self
            .events
            .send(NotificationEvent::PreferencesUpdated {
                preferences: preferences.clone(),
            })
            .is_err()
        {
            tracing::trace!("no event subscribers");
        }
        Ok(preferences)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::domain::preferences::NotificationFrequency;
    use crate::repository::memory::InMemoryNotificationRepository;
    use crate::usecase::contracts::MockPreferencesRepository;

    #[tokio::test]
    async fn test_get_preferences_defaults() {
        let (events, _) = broadcast::channel(4);
        let usecase = PreferencesUseCase::new(InMemoryNotificationRepository::new(), events);

        let preferences = usecase.get_preferences().await.unwrap();

        assert_eq!(preferences, NotificationPreferences::default());
    }

    #[tokio::test]
    async fn test_update_merges_only_given_fields() {
        let (events, _) = broadcast::channel(4);
        let usecase = PreferencesUseCase::new(InMemoryNotificationRepository::new(), events);
        let before = usecase.get_preferences().await.unwrap();

        let after = usecase
            .update_preferences(&PreferencesUpdate {
                do_not_disturb_enabled: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(
            after,
            NotificationPreferences {
                do_not_disturb_enabled: true,
                ..before
            }
        );
        assert_eq!(usecase.get_preferences().await.unwrap(), after);
    }

    #[tokio::test]
    async fn test_successive_updates_accumulate() {
        let (events, _) = broadcast::channel(4);
        let usecase = PreferencesUseCase::new(InMemoryNotificationRepository::new(), events);

        usecase
            .update_preferences(&PreferencesUpdate {
                notification_frequency: Some(NotificationFrequency::Weekly),
                ..Default::default()
            })
            .await
            .unwrap();
        let after = usecase
            .update_preferences(&PreferencesUpdate {
                do_not_disturb_start: NaiveTime::from_hms_opt(21, 30, 0),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(after.notification_frequency, NotificationFrequency::Weekly);
        assert_eq!(after.do_not_disturb_start, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert_eq!(after.do_not_disturb_end, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_update_publishes_event() {
        let (events, _) = broadcast::channel(4);
        let mut rx = events.subscribe();
        let usecase = PreferencesUseCase::new(InMemoryNotificationRepository::new(), events);

        let after = usecase
            .update_preferences(&PreferencesUpdate {
                system_alerts: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            NotificationEvent::PreferencesUpdated { preferences: after }
        );
    }

    #[tokio::test]
    async fn test_empty_update_skips_repository_write() {
        let mut mock_repo = MockPreferencesRepository::new();
        mock_repo.expect_update().times(0);
        mock_repo
            .expect_get()
            .times(1)
            .returning(|| Ok(NotificationPreferences::default()));

        let (events, _) = broadcast::channel(4);
        let mut rx = events.subscribe();
        let usecase = PreferencesUseCase::new(mock_repo, events);

        let result = usecase.update_preferences(&PreferencesUpdate::default()).await;

        assert!(result.is_ok());
        assert!(rx.try_recv().is_err());
    }
}

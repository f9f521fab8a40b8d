use tokio::sync::{Mutex, broadcast};

use crate::domain::event::NotificationEvent;
use crate::domain::notification::{NewNotification, Notification, NotificationStats};
use crate::usecase::contracts::{Clock, IdGenerator, NotificationRepository};
use crate::usecase::error::UsecaseError;

pub struct NotificationsUseCase<N, C, G>
where
    N: NotificationRepository,
    C: Clock,
    G: IdGenerator,
{
    notification_repository: N,
    clock: C,
    id_generator: G,
    events: broadcast::Sender<NotificationEvent>,
    /// Serializes `add` so stamp order, feed order and event order agree.
    append_lock: Mutex<()>,
}

impl<N, C, G> NotificationsUseCase<N, C, G>
where
    N: NotificationRepository,
    C: Clock,
    G: IdGenerator,
{
    pub fn new(
        notification_repository: N,
        clock: C,
        id_generator: G,
        events: broadcast::Sender<NotificationEvent>,
    ) -> Self {
        Self {
            notification_repository,
            clock,
            id_generator,
            events,
            append_lock: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Notification>, UsecaseError> {
        tracing::debug!("listing notifications");

        let notifications = self.notification_repository.list_all().await?;

        tracing::debug!(count = notifications.len(), "retrieved notifications");
        Ok(notifications)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_unread(&self) -> Result<Vec<Notification>, UsecaseError> {
        tracing::debug!("listing unread notifications");

        let notifications = self.notification_repository.list_unread().await?;

        tracing::debug!(count = notifications.len(), "retrieved unread notifications");
        Ok(notifications)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_stats(&self) -> Result<NotificationStats, UsecaseError> {
        let stats = self.notification_repository.stats().await?;

        tracing::debug!(total = stats.total, unread = stats.unread, "notification stats computed");
        Ok(stats)
    }

    /// Stamps the notification with a fresh id and the current time and
    /// puts it at the head of the feed. Empty titles are rejected.
    #[tracing::instrument(skip(self, new), fields(notification_type = %new.notification_type))]
    pub async fn add(&self, new: NewNotification) -> Result<Notification, UsecaseError> {
        tracing::debug!("creating notification");

        if new.title.trim().is_empty() {
            tracing::warn!("rejecting notification with empty title");
            return Err(UsecaseError::Validation("Notification title must not be empty".to_string()));
        }

        let _guard = self.append_lock.lock().await;

        let notification = new.into_notification(self.id_generator.next_id(), self.clock.now());
        self.notification_repository.prepend(&notification).await?;

        metrics::counter!("notifications_created_total", "type" => notification.notification_type.as_str())
            .increment(1);
        tracing::info!(notification_id = %notification.id, "notification created");

        self.publish(NotificationEvent::Added {
            notification: notification.clone(),
        });
        Ok(notification)
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    pub async fn mark_as_read(&self, id: &str) -> Result<(), UsecaseError> {
        tracing::debug!("marking notification as read");

        if self.notification_repository.mark_as_read(id).await? {
            metrics::counter!("notifications_marked_read_total").increment(1);
            tracing::debug!(notification_id = %id, "notification marked as read");
            self.publish(NotificationEvent::MarkedRead { id: id.to_string() });
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_all_as_read(&self) -> Result<(), UsecaseError> {
        tracing::debug!("marking all notifications as read");

        let count = self.notification_repository.mark_all_as_read().await?;
        if count > 0 {
            metrics::counter!("notifications_marked_read_total").increment(count as u64);
            self.publish(NotificationEvent::AllMarkedRead { count });
        }

        tracing::debug!(count, "all notifications marked as read");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), UsecaseError> {
        tracing::debug!("deleting notification");

        if self.notification_repository.delete(id).await? {
            metrics::counter!("notifications_deleted_total").increment(1);
            tracing::info!(notification_id = %id, "notification deleted");
            self.publish(NotificationEvent::Deleted { id: id.to_string() });
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear_all(&self) -> Result<(), UsecaseError> {
        tracing::debug!("clearing notifications");

        let count = self.notification_repository.clear().await?;
        if count > 0 {
            metrics::counter!("notifications_cleared_total").increment(count as u64);
            tracing::info!(count, "notifications cleared");
            self.publish(NotificationEvent::Cleared { count });
        }

        Ok(())
    }

    fn publish(&self, event: NotificationEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("no event subscribers");
        }
    }
}

use chrono::{DateTime, Utc};

use crate::{
    domain::notification::{Notification, NotificationStats},
    domain::preferences::{NotificationPreferences, PreferencesUpdate},
    repository::errors::RepositoryError,
};

/// Newest-first notification feed. Lookups by an unknown id are not
/// errors; the boolean results report whether anything changed.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Notification>, RepositoryError>;
    async fn list_unread(&self) -> Result<Vec<Notification>, RepositoryError>;
    async fn stats(&self) -> Result<NotificationStats, RepositoryError>;
    async fn prepend(&self, notification: &Notification) -> Result<(), RepositoryError>;
    async fn mark_as_read(&self, id: &str) -> Result<bool, RepositoryError>;
    async fn mark_all_as_read(&self) -> Result<usize, RepositoryError>;
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;
    async fn clear(&self) -> Result<usize, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PreferencesRepository: Send + Sync {
    async fn get(&self) -> Result<NotificationPreferences, RepositoryError>;
    async fn update(&self, update: &PreferencesUpdate) -> Result<NotificationPreferences, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

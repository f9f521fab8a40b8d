use serde::{Deserialize, Serialize};

use crate::domain::notification::Notification;
use crate::domain::preferences::NotificationPreferences;

/// Change published after a mutation has been applied to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    Added { notification: Notification },
    MarkedRead { id: String },
    AllMarkedRead { count: usize },
    Deleted { id: String },
    Cleared { count: usize },
    PreferencesUpdated { preferences: NotificationPreferences },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_tagged() {
        let value = serde_json::to_value(NotificationEvent::MarkedRead { id: "7".to_string() }).unwrap();

        assert_eq!(value["event"], "marked_read");
        assert_eq!(value["id"], "7");
    }
}

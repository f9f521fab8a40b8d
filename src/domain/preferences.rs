use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::notification::NotificationType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFrequency {
    Instant,
    Hourly,
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub demo_request_alerts: bool,
    pub user_activity_alerts: bool,
    pub system_alerts: bool,
    pub notification_frequency: NotificationFrequency,
    #[serde(with = "hh_mm")]
    pub do_not_disturb_start: NaiveTime,
    #[serde(with = "hh_mm")]
    pub do_not_disturb_end: NaiveTime,
    pub do_not_disturb_enabled: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            demo_request_alerts: true,
            user_activity_alerts: true,
            system_alerts: true,
            notification_frequency: NotificationFrequency::Instant,
            do_not_disturb_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            do_not_disturb_end: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            do_not_disturb_enabled: false,
        }
    }
}

impl NotificationPreferences {
    /// Whether `time` falls inside the do-not-disturb window. The window
    /// is half-open and may wrap past midnight; equal bounds mean empty.
    pub fn is_quiet_time(&self, time: NaiveTime) -> bool {
        if !self.do_not_disturb_enabled {
            return false;
        }

        let (start, end) = (self.do_not_disturb_start, self.do_not_disturb_end);
        if start == end {
            false
        } else if start < end {
            time >= start && time < end
        } else {
            time >= start || time < end
        }
    }

    pub fn alerts_enabled_for(&self, notification_type: NotificationType) -> bool {
        match notification_type {
            NotificationType::DemoRequest => self.demo_request_alerts,
            NotificationType::UserActivity => self.user_activity_alerts,
            NotificationType::System => self.system_alerts,
            _ => true,
        }
    }

    pub fn should_deliver(&self, notification_type: NotificationType, time: NaiveTime) -> bool {
        self.alerts_enabled_for(notification_type) && !self.is_quiet_time(time)
    }
}

/// Partial preferences. Fields left as `None` are not touched by `apply`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_request_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_activity_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_frequency: Option<NotificationFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hh_mm::option")]
    pub do_not_disturb_start: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hh_mm::option")]
    pub do_not_disturb_end: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_not_disturb_enabled: Option<bool>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, preferences: &mut NotificationPreferences) {
        if let Some(v) = self.email_notifications {
            preferences.email_notifications = v;
        }
        if let Some(v) = self.demo_request_alerts {
            preferences.demo_request_alerts = v;
        }
        if let Some(v) = self.user_activity_alerts {
            preferences.user_activity_alerts = v;
        }
        if let Some(v) = self.system_alerts {
            preferences.system_alerts = v;
        }
        if let Some(v) = self.notification_frequency {
            preferences.notification_frequency = v;
        }
        if let Some(v) = self.do_not_disturb_start {
            preferences.do_not_disturb_start = v;
        }
        if let Some(v) = self.do_not_disturb_end {
            preferences.do_not_disturb_end = v;
        }
        if let Some(v) = self.do_not_disturb_enabled {
            preferences.do_not_disturb_enabled = v;
        }
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| NaiveTime::parse_from_str(&raw, super::FORMAT))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_default_preferences() {
        let prefs = NotificationPreferences::default();

        assert!(prefs.email_notifications);
        assert!(prefs.system_alerts);
        assert_eq!(prefs.notification_frequency, NotificationFrequency::Instant);
        assert_eq!(prefs.do_not_disturb_start, at(22, 0));
        assert_eq!(prefs.do_not_disturb_end, at(8, 0));
        assert!(!prefs.do_not_disturb_enabled);
    }

    #[test]
    fn test_partial_update_touches_only_given_fields() {
        let original = NotificationPreferences::default();
        let mut updated = original.clone();
        let update = PreferencesUpdate {
            do_not_disturb_enabled: Some(true),
            ..Default::default()
        };

        update.apply(&mut updated);

        assert!(updated.do_not_disturb_enabled);
        updated.do_not_disturb_enabled = original.do_not_disturb_enabled;
        assert_eq!(updated, original);
    }

    #[test]
    fn test_empty_update() {
        assert!(PreferencesUpdate::default().is_empty());
        assert!(!PreferencesUpdate { system_alerts: Some(false), ..Default::default() }.is_empty());
    }

    #[test]
    fn test_preferences_time_format() {
        let value = serde_json::to_value(NotificationPreferences::default()).unwrap();

        assert_eq!(value["do_not_disturb_start"], "22:00");
        assert_eq!(value["do_not_disturb_end"], "08:00");
        assert_eq!(value["notification_frequency"], "instant");
    }

    #[test]
    fn test_update_deserializes_partial_body() {
        let update: PreferencesUpdate =
            serde_json::from_str(r#"{"do_not_disturb_start":"23:30","notification_frequency":"daily"}"#).unwrap();

        assert_eq!(update.do_not_disturb_start, Some(at(23, 30)));
        assert_eq!(update.notification_frequency, Some(NotificationFrequency::Daily));
        assert_eq!(update.do_not_disturb_end, None);
        assert_eq!(update.email_notifications, None);
    }

    #[test]
    fn test_update_rejects_malformed_values() {
        assert!(serde_json::from_str::<PreferencesUpdate>(r#"{"do_not_disturb_end":"25:00"}"#).is_err());
        assert!(serde_json::from_str::<PreferencesUpdate>(r#"{"do_not_disturb_end":"8am"}"#).is_err());
        assert!(serde_json::from_str::<PreferencesUpdate>(r#"{"notification_frequency":"monthly"}"#).is_err());
    }

    #[test]
    fn test_quiet_time_wraps_midnight() {
        let prefs = NotificationPreferences {
            do_not_disturb_enabled: true,
            ..Default::default()
        };

        assert!(prefs.is_quiet_time(at(23, 15)));
        assert!(prefs.is_quiet_time(at(0, 0)));
        assert!(prefs.is_quiet_time(at(7, 59)));
        assert!(!prefs.is_quiet_time(at(8, 0)));
        assert!(!prefs.is_quiet_time(at(12, 0)));
        assert!(prefs.is_quiet_time(at(22, 0)));
    }

    #[test]
    fn test_quiet_time_same_day_window() {
        let prefs = NotificationPreferences {
            do_not_disturb_enabled: true,
            do_not_disturb_start: at(12, 0),
            do_not_disturb_end: at(13, 0),
            ..Default::default()
        };

        assert!(prefs.is_quiet_time(at(12, 30)));
        assert!(!prefs.is_quiet_time(at(13, 0)));
        assert!(!prefs.is_quiet_time(at(11, 59)));
    }

    #[test]
    fn test_quiet_time_disabled_or_empty() {
        let disabled = NotificationPreferences::default();
        assert!(!disabled.is_quiet_time(at(23, 0)));

        let empty = NotificationPreferences {
            do_not_disturb_enabled: true,
            do_not_disturb_start: at(9, 0),
            do_not_disturb_end: at(9, 0),
            ..Default::default()
        };
        assert!(!empty.is_quiet_time(at(9, 0)));
    }

    #[test]
    fn test_alert_toggles_map_to_types() {
        let prefs = NotificationPreferences {
            demo_request_alerts: false,
            ..Default::default()
        };

        assert!(!prefs.alerts_enabled_for(NotificationType::DemoRequest));
        assert!(prefs.alerts_enabled_for(NotificationType::System));
        assert!(prefs.alerts_enabled_for(NotificationType::Error));
        assert!(!prefs.should_deliver(NotificationType::DemoRequest, at(12, 0)));
        assert!(prefs.should_deliver(NotificationType::Info, at(12, 0)));
    }
}

use chrono::{DateTime, Duration, Utc};

use crate::domain::notification::{NewNotification, Notification, NotificationType};

/// Sample feed a fresh admin session starts with, newest first.
pub fn sample_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let seeds = [
        (
            "1",
            Duration::minutes(5),
            NewNotification::new(
                NotificationType::DemoRequest,
                "New Demo Request",
                "Sarah Johnson requested a demo of the DemoHub system",
                false,
            )
            .with_action("/admin/demo-requests", "View Request"),
        ),
        (
            "2",
            Duration::minutes(15),
            NewNotification::new(
                NotificationType::UserActivity,
                "New User Activity",
                "Mike Chen completed the onboarding process",
                false,
            )
            .with_action("/admin/users", "View User"),
        ),
        (
            "3",
            Duration::hours(1),
            NewNotification::new(
                NotificationType::System,
                "System Maintenance",
                "Database backup completed successfully",
                true,
            )
            .with_action("/admin/system", "View Details"),
        ),
        (
            "4",
            Duration::hours(2),
            NewNotification::new(
                NotificationType::DemoRequest,
                "Demo Request Approved",
                "Jennifer Lee approved the demo request from Q1 sales team",
                false,
            )
            .with_action("/admin/demo-requests", "View"),
        ),
        (
            "5",
            Duration::hours(24),
            NewNotification::new(
                NotificationType::Success,
                "Import Successful",
                "250 records imported from CSV file successfully",
                true,
            ),
        ),
    ];

    seeds
        .into_iter()
        .map(|(id, age, new)| new.into_notification(id.to_string(), now - age))
        .collect()
}

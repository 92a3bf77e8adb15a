// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Nudge notification engine.
//!
//! This crate provides the error type, the time-block day model, the domain
//! types shared across the workspace, and the adapter traits the engine is
//! built against. Storage and transport crates implement the traits defined
//! here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NudgeError;
pub use types::{
    Completion, DailySchedule, NotificationContext, NotificationPayload, NotificationPreferences,
    NotificationTime, PassSummary, PreferredTime, PushOptions, PushSubscription, Reminder,
    SubscriptionKeys, TimeBlock,
};

pub use traits::{
    ActivityCatalog, CompletionStore, PushTransport, ReminderStore, ScheduleStore,
    SubscriptionStore,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_objects_are_constructible() {
        // The engine holds these seams as `Arc<dyn Trait>`; verify all five
        // store traits plus the transport are object safe.
        fn _assert_schedule(_: &dyn ScheduleStore) {}
        fn _assert_completions(_: &dyn CompletionStore) {}
        fn _assert_reminders(_: &dyn ReminderStore) {}
        fn _assert_subscriptions(_: &dyn SubscriptionStore) {}
        fn _assert_catalog(_: &dyn ActivityCatalog) {}
        fn _assert_transport(_: &dyn PushTransport) {}
    }

    #[test]
    fn subscription_serializes_with_wire_field_names() {
        let sub = PushSubscription {
            endpoint: "https://push.example/ep".into(),
            keys: SubscriptionKeys {
                p256dh: "p".into(),
                auth: "a".into(),
            },
            timezone: "Europe/Berlin".into(),
            notification_times: vec![NotificationTime { hour: 8, minute: 15 }],
            user_id: "user-1".into(),
        };
        let json = serde_json::to_string(&sub).expect("should serialize");
        assert!(json.contains("\"p256dh\""));
        assert!(json.contains("\"auth\""));
        let parsed: PushSubscription = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(parsed, sub);
    }
}

// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for full delivery passes over mock stores and a
//! scripted transport.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use nudge_core::{
    Completion, DailySchedule, NotificationTime, PushOptions, PushSubscription, SubscriptionKeys,
    TimeBlock,
};
use nudge_engine::{Dispatcher, EngineStores};
use nudge_test_utils::{MockStore, MockTransport, SendOutcome};

fn make_subscription(endpoint: &str, timezone: &str, times: Vec<NotificationTime>) -> PushSubscription {
    PushSubscription {
        endpoint: endpoint.to_string(),
        keys: SubscriptionKeys {
            p256dh: "p256dh-key".to_string(),
            auth: "auth-secret".to_string(),
        },
        timezone: timezone.to_string(),
        notification_times: times,
        user_id: "user-1".to_string(),
    }
}

fn dispatcher(store: &MockStore, transport: &MockTransport) -> Dispatcher {
    let stores = EngineStores {
        schedules: Arc::new(store.clone()),
        completions: Arc::new(store.clone()),
        reminders: Arc::new(store.clone()),
        subscriptions: Arc::new(store.clone()),
        catalog: Arc::new(store.clone()),
    };
    Dispatcher::new(stores, Arc::new(transport.clone()), PushOptions::default(), 4)
}

fn at_0815() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 15, 0).unwrap()
}

fn morning_time() -> Vec<NotificationTime> {
    vec![NotificationTime { hour: 8, minute: 15 }]
}

#[tokio::test]
async fn eligible_subscription_receives_notification() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/1", "UTC", morning_time()))
        .await;

    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let mut schedule = DailySchedule::new(date);
    schedule.set_block(TimeBlock::Before9am, vec!["meditate".into()]);
    store.set_schedule("user-1", schedule).await;
    store.name_activity("meditate", "Meditate").await;

    let summary = dispatcher(&store, &transport).run_pass(at_0815()).await.unwrap();
    assert_eq!(summary.checked, 1);
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);

    let sent = transport.sent_to("https://e/1").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Time for Meditate");
}

#[tokio::test]
async fn off_minute_subscription_is_skipped() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/1", "UTC", morning_time()))
        .await;

    let off_minute = Utc.with_ymd_and_hms(2026, 3, 2, 8, 16, 0).unwrap();
    let summary = dispatcher(&store, &transport).run_pass(off_minute).await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.sent, 0);
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn eligibility_uses_the_subscriber_timezone() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    // 08:15 in Berlin during winter is 07:15 UTC.
    store
        .add_subscription(make_subscription(
            "https://e/berlin",
            "Europe/Berlin",
            morning_time(),
        ))
        .await;

    let d = dispatcher(&store, &transport);
    let summary = d
        .run_pass(Utc.with_ymd_and_hms(2026, 1, 15, 7, 15, 0).unwrap())
        .await
        .unwrap();
    assert_eq!(summary.sent, 1);

    let summary = d
        .run_pass(Utc.with_ymd_and_hms(2026, 1, 15, 8, 15, 0).unwrap())
        .await
        .unwrap();
    assert_eq!(summary.skipped, 1);
}

#[tokio::test]
async fn invalid_timezone_falls_back_to_utc_and_pass_continues() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/bad-tz", "Mars/Olympus", morning_time()))
        .await;
    store
        .add_subscription(make_subscription("https://e/ok", "UTC", morning_time()))
        .await;

    let summary = dispatcher(&store, &transport).run_pass(at_0815()).await.unwrap();
    // The bad-tz subscription matched on the UTC clock too.
    assert_eq!(summary.sent, 2);
    assert_eq!(summary.failed, 0);
}

#[tokio::test]
async fn gone_endpoint_is_deleted_exactly_once_and_absent_next_pass() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/gone", "UTC", morning_time()))
        .await;
    transport.script("https://e/gone", SendOutcome::Gone).await;

    let d = dispatcher(&store, &transport);
    let summary = d.run_pass(at_0815()).await.unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(store.deleted_endpoints().await, ["https://e/gone"]);
    assert_eq!(store.subscription_count().await, 0);

    // Next pass has nothing left to try.
    let summary = d.run_pass(at_0815()).await.unwrap();
    assert_eq!(summary.checked, 0);
    assert_eq!(store.deleted_endpoints().await.len(), 1);
}

#[tokio::test]
async fn transient_failure_keeps_the_subscription() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/flaky", "UTC", morning_time()))
        .await;
    transport.script("https://e/flaky", SendOutcome::Transient).await;

    let summary = dispatcher(&store, &transport).run_pass(at_0815()).await.unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(store.subscription_count().await, 1);
    assert!(store.deleted_endpoints().await.is_empty());
}

#[tokio::test]
async fn one_bad_recipient_does_not_affect_the_others() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/gone", "UTC", morning_time()))
        .await;
    store
        .add_subscription(make_subscription("https://e/ok", "UTC", morning_time()))
        .await;
    transport.script("https://e/gone", SendOutcome::Gone).await;

    let summary = dispatcher(&store, &transport).run_pass(at_0815()).await.unwrap();
    assert_eq!(summary.checked, 2);
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(transport.sent_to("https://e/ok").await.len(), 1);
}

#[tokio::test]
async fn store_read_failure_degrades_to_generic_payload() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/1", "UTC", morning_time()))
        .await;
    store.fail_schedule_reads(true);

    let summary = dispatcher(&store, &transport).run_pass(at_0815()).await.unwrap();
    assert_eq!(summary.sent, 1, "the send must still happen");

    let sent = transport.sent_to("https://e/1").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Habit check-in");
}

#[tokio::test]
async fn subscription_list_failure_aborts_the_pass() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store.fail_subscription_list(true);

    let result = dispatcher(&store, &transport).run_pass(at_0815()).await;
    assert!(result.is_err());
    assert!(transport.sent().await.is_empty());
}

#[tokio::test]
async fn force_send_ignores_eligibility() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/1", "UTC", morning_time()))
        .await;
    store
        .add_subscription(make_subscription("https://e/2", "UTC", vec![]))
        .await;

    let off_minute = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    let summary = dispatcher(&store, &transport).force_send(off_minute).await.unwrap();
    assert_eq!(summary.sent, 2);
    assert_eq!(summary.skipped, 0);
}

#[tokio::test]
async fn fully_completed_day_sends_celebration() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/1", "UTC", morning_time()))
        .await;

    let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let mut schedule = DailySchedule::new(date);
    schedule.set_block(TimeBlock::Before9am, vec!["meditate".into()]);
    store.set_schedule("user-1", schedule).await;
    store
        .add_completion(
            "user-1",
            date,
            Completion {
                activity_id: "meditate".to_string(),
                block: TimeBlock::Before9am,
                completed_at: date.and_hms_opt(7, 0, 0).unwrap().and_utc(),
            },
        )
        .await;

    dispatcher(&store, &transport).run_pass(at_0815()).await.unwrap();
    let sent = transport.sent_to("https://e/1").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "All done! 🎉");
}

#[tokio::test]
async fn empty_day_sends_check_in_not_celebration() {
    let store = MockStore::new();
    let transport = MockTransport::new();
    store
        .add_subscription(make_subscription("https://e/1", "UTC", morning_time()))
        .await;

    dispatcher(&store, &transport).run_pass(at_0815()).await.unwrap();
    let sent = transport.sent_to("https://e/1").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Evening check-in");
}

// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common domain types used across adapter traits and the Nudge engine.
//!
//! The day model partitions `[0, 24)` into six ordered [`TimeBlock`]s with
//! fixed decimal-hour bounds. Everything downstream (context building,
//! message generation, eligibility matching) indexes into this partition.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One of the six fixed hour-range buckets a day is partitioned into.
///
/// Ordering is significant: "current block" and "next block" are computed
/// by index. The final block is an evening catch-all, so the six bounds
/// cover `[0, 24)` with no gaps or overlaps.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum TimeBlock {
    #[serde(rename = "before6am")]
    #[strum(serialize = "before6am")]
    Before6am,
    #[serde(rename = "before9am")]
    #[strum(serialize = "before9am")]
    Before9am,
    #[serde(rename = "beforeNoon")]
    #[strum(serialize = "beforeNoon")]
    BeforeNoon,
    #[serde(rename = "before230pm")]
    #[strum(serialize = "before230pm")]
    Before230pm,
    #[serde(rename = "before5pm")]
    #[strum(serialize = "before5pm")]
    Before5pm,
    #[serde(rename = "before9pm")]
    #[strum(serialize = "before9pm")]
    Before9pm,
}

impl TimeBlock {
    /// All blocks in chronological order.
    pub const ALL: [TimeBlock; 6] = [
        TimeBlock::Before6am,
        TimeBlock::Before9am,
        TimeBlock::BeforeNoon,
        TimeBlock::Before230pm,
        TimeBlock::Before5pm,
        TimeBlock::Before9pm,
    ];

    /// Half-open `[start, end)` decimal-hour bounds of this block.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            TimeBlock::Before6am => (0.0, 6.0),
            TimeBlock::Before9am => (6.0, 9.0),
            TimeBlock::BeforeNoon => (9.0, 12.0),
            TimeBlock::Before230pm => (12.0, 14.5),
            TimeBlock::Before5pm => (14.5, 17.0),
            TimeBlock::Before9pm => (17.0, 24.0),
        }
    }

    /// Resolves a decimal hour (`hour + minute / 60`) to its block.
    ///
    /// Total over `[0, 24)`: anything at or past the last block's start
    /// resolves to the last block.
    pub fn at_hour(hour_decimal: f64) -> TimeBlock {
        for block in TimeBlock::ALL {
            if hour_decimal < block.bounds().1 {
                return block;
            }
        }
        TimeBlock::Before9pm
    }

    /// Resolves a wall-clock time to its block.
    pub fn at_time(time: NaiveTime) -> TimeBlock {
        TimeBlock::at_hour(f64::from(time.hour()) + f64::from(time.minute()) / 60.0)
    }

    /// Position of this block in the day, 0-based.
    pub fn index(self) -> usize {
        TimeBlock::ALL
            .iter()
            .position(|b| *b == self)
            .unwrap_or(TimeBlock::ALL.len() - 1)
    }

    /// The block after this one, or `None` for the last block of the day.
    pub fn next(self) -> Option<TimeBlock> {
        TimeBlock::ALL.get(self.index() + 1).copied()
    }

    /// Human-readable label used in notification text.
    pub fn label(self) -> &'static str {
        match self {
            TimeBlock::Before6am => "Early morning",
            TimeBlock::Before9am => "Morning",
            TimeBlock::BeforeNoon => "Late morning",
            TimeBlock::Before230pm => "Early afternoon",
            TimeBlock::Before5pm => "Afternoon",
            TimeBlock::Before9pm => "Evening",
        }
    }
}

/// A user's planned day: ordered activity ids per time block.
///
/// Produced and owned by the scheduling UI; the engine only reads "today".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySchedule {
    /// Calendar date this schedule belongs to.
    pub date: NaiveDate,
    /// Activity ids planned for each block, in display order.
    #[serde(default)]
    pub blocks: BTreeMap<TimeBlock, Vec<String>>,
}

impl DailySchedule {
    /// Creates an empty schedule for the given date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            blocks: BTreeMap::new(),
        }
    }

    /// The activities planned for one block (empty slice when none).
    pub fn activities(&self, block: TimeBlock) -> &[String] {
        self.blocks.get(&block).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the activity list for one block.
    pub fn set_block(&mut self, block: TimeBlock, activity_ids: Vec<String>) {
        if activity_ids.is_empty() {
            self.blocks.remove(&block);
        } else {
            self.blocks.insert(block, activity_ids);
        }
    }

    /// Total number of scheduled activities across all blocks.
    pub fn total_activities(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }

    /// True when no block has any activity.
    pub fn is_empty(&self) -> bool {
        self.total_activities() == 0
    }
}

/// One scheduled item marked done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Activity this completion belongs to.
    pub activity_id: String,
    /// Block the activity was scheduled in.
    pub block: TimeBlock,
    /// Instant the item was marked done.
    pub completed_at: DateTime<Utc>,
}

/// A task reminder sourced from an external task list, filtered to one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    /// Due wall-clock time in the recipient's day, `None` for undated items.
    pub due_at: Option<NaiveDateTime>,
    pub is_completed: bool,
    pub is_all_day: bool,
    /// True when completion was toggled inside the app. Reminders completed
    /// only in the external source are never announced as "just done".
    pub completed_in_app: bool,
}

/// One configured delivery time on a subscription (subscriber-local clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTime {
    pub hour: u32,
    pub minute: u32,
}

/// One entry in a device's notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredTime {
    pub hour: u32,
    pub minute: u32,
    pub enabled: bool,
}

/// Per-device notification preferences.
///
/// `times` is not deduplicated by the engine; the exact-minute matcher
/// fires once per tick regardless of duplicate entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub enabled: bool,
    #[serde(default)]
    pub times: Vec<PreferredTime>,
    /// Device-local record of the last shown notification, if tracked.
    #[serde(default)]
    pub last_notification_time: Option<DateTime<Utc>>,
}

/// Browser push encryption keys, as exported by the Push API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// A registered push endpoint plus its delivery-time preferences.
///
/// One row per browser/device. Deleted explicitly by the user or
/// automatically when the push service reports the endpoint gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
    /// IANA timezone name declared by the device (e.g. `Europe/Berlin`).
    pub timezone: String,
    #[serde(default)]
    pub notification_times: Vec<NotificationTime>,
    pub user_id: String,
}

/// The ephemeral diff of "what's done / pending / next", recomputed fresh
/// for every delivery attempt. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContext {
    /// Display items completed since the last notification was shown.
    pub completed_since_last: Vec<String>,
    /// Scheduled-but-unfinished items up to and including the current block.
    pub pending: Vec<String>,
    /// Items scheduled in the next block.
    pub upcoming: Vec<String>,
    /// True iff a non-empty activity/reminder universe is fully complete.
    pub all_day_complete: bool,
    /// Size of the activity + reminder universe the flags were computed over.
    pub total_items: usize,
    pub current_block: TimeBlock,
    pub next_block: Option<TimeBlock>,
}

/// The rendered notification handed to the push transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

/// Delivery knobs for a single push send.
#[derive(Debug, Clone, Copy)]
pub struct PushOptions {
    /// Push service TTL in seconds. Kept short: a missed check-in is not
    /// worth resurrecting later.
    pub ttl_secs: u32,
    /// Deadline for the whole send attempt.
    pub timeout: std::time::Duration,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            timeout: std::time::Duration::from_secs(10),
        }
    }
}

/// Aggregate counters for one full delivery pass over all subscriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    pub checked: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context builder: the pure diff of "what's done, pending, and next".
//!
//! No I/O and no side effects; identical inputs always produce the same
//! context, so every delivery attempt recomputes it from scratch.

use std::collections::HashSet;

use chrono::{DateTime, NaiveTime, Timelike, Utc};

use nudge_core::{Completion, DailySchedule, NotificationContext, Reminder, TimeBlock};

/// Build the notification context for one recipient at one local instant.
///
/// `last_notification` gates the "completed since last" list: when `None`,
/// nothing is announced as freshly done. Items appear by activity id
/// (resolved to display names later) or by reminder title.
pub fn build_context(
    schedule: Option<&DailySchedule>,
    completions: &[Completion],
    reminders: &[Reminder],
    last_notification: Option<DateTime<Utc>>,
    local_now: NaiveTime,
) -> NotificationContext {
    let current_block = TimeBlock::at_time(local_now);
    let next_block = current_block.next();
    let current_end = current_block.bounds().1;

    let completed: HashSet<(&str, TimeBlock)> = completions
        .iter()
        .map(|c| (c.activity_id.as_str(), c.block))
        .collect();

    let mut completed_since_last = Vec::new();
    let mut pending = Vec::new();
    let mut upcoming = Vec::new();
    let mut total_items = 0usize;
    let mut all_complete = true;

    if let Some(schedule) = schedule {
        for block in TimeBlock::ALL {
            for activity_id in schedule.activities(block) {
                total_items += 1;
                let is_done = completed.contains(&(activity_id.as_str(), block));
                if !is_done {
                    all_complete = false;
                }

                if block <= current_block {
                    if is_done {
                        if let Some(last) = last_notification {
                            let fresh = completions.iter().any(|c| {
                                c.activity_id == *activity_id
                                    && c.block == block
                                    && c.completed_at > last
                            });
                            if fresh {
                                completed_since_last.push(activity_id.clone());
                            }
                        }
                    } else {
                        pending.push(activity_id.clone());
                    }
                }

                if Some(block) == next_block {
                    upcoming.push(activity_id.clone());
                }
            }
        }
    }

    for reminder in reminders {
        total_items += 1;
        if !reminder.is_completed {
            all_complete = false;
        }

        if reminder.is_completed {
            // Reminders completed only in the external source are never
            // announced as "just done".
            if last_notification.is_some() && reminder.completed_in_app {
                completed_since_last.push(reminder.title.clone());
            }
        } else {
            let due_now = match reminder.due_at {
                Some(due) if !reminder.is_all_day => {
                    let due_decimal =
                        f64::from(due.time().hour()) + f64::from(due.time().minute()) / 60.0;
                    due_decimal <= current_end
                }
                _ => true,
            };
            if due_now {
                pending.push(reminder.title.clone());
            }
        }
    }

    NotificationContext {
        completed_since_last,
        pending,
        upcoming,
        // An empty universe is reported as not-complete: "all done" is a
        // statement about finished work, not the absence of any.
        all_day_complete: total_items > 0 && all_complete,
        total_items,
        current_block,
        next_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn completion(activity_id: &str, block: TimeBlock, hour: u32) -> Completion {
        Completion {
            activity_id: activity_id.to_string(),
            block,
            completed_at: date().and_hms_opt(hour, 0, 0).unwrap().and_utc(),
        }
    }

    fn reminder(title: &str, hour: Option<u32>) -> Reminder {
        Reminder {
            id: format!("rem-{title}"),
            title: title.to_string(),
            due_at: hour.map(|h| date().and_hms_opt(h, 0, 0).unwrap()),
            is_completed: false,
            is_all_day: hour.is_none(),
            completed_in_app: false,
        }
    }

    /// Typical mid-morning check: meditate done in the morning block, walk
    /// still open, a timed reminder due later.
    #[test]
    fn meditate_and_walk_scenario() {
        let mut schedule = DailySchedule::new(date());
        schedule.set_block(TimeBlock::Before9am, vec!["meditate".into()]);
        schedule.set_block(TimeBlock::BeforeNoon, vec!["walk".into()]);
        let completions = [completion("meditate", TimeBlock::Before9am, 7)];
        let reminders = [reminder("Call dentist", Some(16))];

        let ctx = build_context(
            Some(&schedule),
            &completions,
            &reminders,
            Some(date().and_hms_opt(6, 0, 0).unwrap().and_utc()),
            at(10, 0),
        );

        assert_eq!(ctx.current_block, TimeBlock::BeforeNoon);
        assert_eq!(ctx.next_block, Some(TimeBlock::Before230pm));
        assert_eq!(ctx.completed_since_last, ["meditate"]);
        assert_eq!(ctx.pending, ["walk"]);
        assert!(ctx.upcoming.is_empty());
        assert!(!ctx.all_day_complete);
        assert_eq!(ctx.total_items, 3);
    }

    #[test]
    fn identical_inputs_build_identical_context() {
        let mut schedule = DailySchedule::new(date());
        schedule.set_block(TimeBlock::Before9am, vec!["meditate".into()]);
        let completions = [completion("meditate", TimeBlock::Before9am, 7)];
        let reminders = [reminder("Water plants", None)];
        let last = Some(date().and_hms_opt(6, 0, 0).unwrap().and_utc());

        let a = build_context(Some(&schedule), &completions, &reminders, last, at(9, 30));
        let b = build_context(Some(&schedule), &completions, &reminders, last, at(9, 30));
        assert_eq!(a, b);
    }

    #[test]
    fn no_last_notification_announces_nothing() {
        let mut schedule = DailySchedule::new(date());
        schedule.set_block(TimeBlock::Before9am, vec!["meditate".into()]);
        let completions = [completion("meditate", TimeBlock::Before9am, 7)];

        let ctx = build_context(Some(&schedule), &completions, &[], None, at(10, 0));
        assert!(ctx.completed_since_last.is_empty());
        assert!(ctx.all_day_complete);
    }

    #[test]
    fn stale_completions_are_not_reannounced() {
        let mut schedule = DailySchedule::new(date());
        schedule.set_block(TimeBlock::Before9am, vec!["meditate".into(), "stretch".into()]);
        let completions = [
            completion("meditate", TimeBlock::Before9am, 6),
            completion("stretch", TimeBlock::Before9am, 8),
        ];
        let last = Some(date().and_hms_opt(7, 0, 0).unwrap().and_utc());

        let ctx = build_context(Some(&schedule), &completions, &[], last, at(8, 30));
        assert_eq!(ctx.completed_since_last, ["stretch"]);
    }

    #[test]
    fn externally_completed_reminder_is_silent() {
        let mut done_outside = reminder("Call dentist", Some(9));
        done_outside.is_completed = true;
        let mut done_in_app = reminder("Water plants", Some(9));
        done_in_app.is_completed = true;
        done_in_app.completed_in_app = true;
        let last = Some(date().and_hms_opt(6, 0, 0).unwrap().and_utc());

        let ctx = build_context(None, &[], &[done_outside, done_in_app], last, at(10, 0));
        assert_eq!(ctx.completed_since_last, ["Water plants"]);
        assert!(ctx.all_day_complete);
    }

    #[test]
    fn future_timed_reminder_is_not_pending_yet() {
        let reminders = [reminder("Evening call", Some(19)), reminder("Morning note", Some(8))];
        let ctx = build_context(None, &[], &reminders, None, at(10, 0));
        // BeforeNoon ends at 12.0: the 19:00 reminder is out of scope.
        assert_eq!(ctx.pending, ["Morning note"]);
    }

    #[test]
    fn all_day_reminder_is_always_pending() {
        let reminders = [reminder("Water plants", None)];
        let ctx = build_context(None, &[], &reminders, None, at(6, 30));
        assert_eq!(ctx.pending, ["Water plants"]);
    }

    #[test]
    fn empty_universe_is_not_all_day_complete() {
        let ctx = build_context(None, &[], &[], None, at(12, 0));
        assert!(!ctx.all_day_complete);
        assert_eq!(ctx.total_items, 0);
        assert!(ctx.pending.is_empty());
    }

    #[test]
    fn full_completion_of_nonempty_day_is_complete() {
        let mut schedule = DailySchedule::new(date());
        schedule.set_block(TimeBlock::Before9am, vec!["meditate".into()]);
        let completions = [completion("meditate", TimeBlock::Before9am, 7)];
        let ctx = build_context(Some(&schedule), &completions, &[], None, at(10, 0));
        assert!(ctx.all_day_complete);
        assert_eq!(ctx.total_items, 1);
    }

    #[test]
    fn upcoming_lists_next_block_only() {
        let mut schedule = DailySchedule::new(date());
        schedule.set_block(TimeBlock::Before230pm, vec!["lunch-walk".into()]);
        schedule.set_block(TimeBlock::Before5pm, vec!["deep-work".into()]);

        let ctx = build_context(Some(&schedule), &[], &[], None, at(10, 0));
        assert_eq!(ctx.upcoming, ["lunch-walk"]);
    }

    #[test]
    fn last_block_has_no_upcoming() {
        let mut schedule = DailySchedule::new(date());
        schedule.set_block(TimeBlock::Before9pm, vec!["journal".into()]);
        let ctx = build_context(Some(&schedule), &[], &[], None, at(22, 0));
        assert_eq!(ctx.next_block, None);
        assert!(ctx.upcoming.is_empty());
        assert_eq!(ctx.pending, ["journal"]);
    }
}

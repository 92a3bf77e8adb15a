// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery scheduling: per-subscription local clocks and exact-minute
//! eligibility.
//!
//! The engine expects an external trigger (or the serve ticker) once per
//! minute. Matching is exact on (hour, minute); a less frequent trigger
//! silently misses configured times.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use tracing::warn;

use nudge_core::NotificationTime;

/// Resolve one UTC instant into a subscriber's local date and wall clock.
///
/// Invalid IANA names fall back to UTC with a warning; a bad timezone on
/// one subscription must never abort the batch.
pub fn local_clock(now_utc: DateTime<Utc>, tz_name: &str) -> (NaiveDate, NaiveTime) {
    match tz_name.parse::<chrono_tz::Tz>() {
        Ok(tz) => {
            let local = now_utc.with_timezone(&tz);
            (local.date_naive(), local.time())
        }
        Err(_) => {
            warn!(timezone = %tz_name, "invalid IANA timezone, falling back to UTC");
            (now_utc.date_naive(), now_utc.time())
        }
    }
}

/// True when any configured time equals the local clock to the minute.
///
/// Duplicate entries are tolerated; the match fires once per tick either way.
pub fn is_eligible(times: &[NotificationTime], local: NaiveTime) -> bool {
    times
        .iter()
        .any(|t| t.hour == local.hour() && t.minute == local.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn berlin_is_ahead_of_utc_in_winter() {
        let (date, time) = local_clock(utc(2026, 1, 15, 23, 30), "Europe/Berlin");
        // 23:30 UTC is 00:30 the next day in CET.
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
        assert_eq!(time.hour(), 0);
        assert_eq!(time.minute(), 30);
    }

    #[test]
    fn invalid_timezone_falls_back_to_utc() {
        let now = utc(2026, 3, 2, 8, 15);
        let (date, time) = local_clock(now, "Not/AZone");
        assert_eq!(date, now.date_naive());
        assert_eq!(time, now.time());
    }

    #[test]
    fn eligibility_is_exact_to_the_minute() {
        let times = [NotificationTime { hour: 8, minute: 15 }];
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert!(!is_eligible(&times, at(8, 14)));
        assert!(is_eligible(&times, at(8, 15)));
        assert!(!is_eligible(&times, at(8, 16)));
    }

    #[test]
    fn seconds_do_not_affect_eligibility() {
        let times = [NotificationTime { hour: 8, minute: 15 }];
        let local = NaiveTime::from_hms_opt(8, 15, 59).unwrap();
        assert!(is_eligible(&times, local));
    }

    #[test]
    fn any_of_multiple_times_matches() {
        let times = [
            NotificationTime { hour: 8, minute: 0 },
            NotificationTime { hour: 20, minute: 30 },
        ];
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        assert!(is_eligible(&times, at(8, 0)));
        assert!(is_eligible(&times, at(20, 30)));
        assert!(!is_eligible(&times, at(12, 0)));
    }

    #[test]
    fn empty_times_never_match() {
        assert!(!is_eligible(&[], NaiveTime::from_hms_opt(8, 15, 0).unwrap()));
    }

    #[test]
    fn duplicate_times_still_match_once() {
        let times = [
            NotificationTime { hour: 8, minute: 15 },
            NotificationTime { hour: 8, minute: 15 },
        ];
        assert!(is_eligible(&times, NaiveTime::from_hms_opt(8, 15, 0).unwrap()));
    }
}

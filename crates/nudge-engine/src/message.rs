// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message generator: renders a context into notification title and body.
//!
//! Wording pools are chosen uniformly at random, with no dedup against
//! earlier notifications. The generator takes the RNG as a parameter so
//! tests can seed it.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use nudge_core::{NotificationContext, NotificationPayload};

const ALL_DONE_BODIES: &[&str] = &[
    "Everything on today's list is done. Enjoy the rest of your day!",
    "Clean sweep — every habit and reminder checked off.",
    "That's a wrap: nothing left on the list today.",
    "100% today. Tomorrow's list is lucky to have you.",
];

const SINGLE_PENDING_NUDGES: &[&str] = &[
    "Don't forget: {}.",
    "{} is still waiting on you.",
    "One quick thing left: {}.",
    "Just {} between you and a clear list.",
];

const ENCOURAGEMENTS: &[&str] = &[
    "Still on the list: {}. You've got this.",
    "Up next when you're ready: {}.",
    "A few things are waiting: {}.",
    "Open items: {}. Small steps count.",
];

const CHECK_IN_BODIES: &[&str] = &[
    "How did today go? Take a minute to log it.",
    "Nothing scheduled right now — a good moment to review your day.",
    "Quiet stretch ahead. How are your habits looking?",
];

/// Render one notification from a context.
///
/// Rule order (first match wins): all-done celebration, then composed
/// completed/pending/upcoming fragments, then the generic check-in.
/// Activity ids missing from `names` are rendered as the raw id.
pub fn generate(
    ctx: &NotificationContext,
    names: &HashMap<String, String>,
    rng: &mut impl Rng,
) -> NotificationPayload {
    if ctx.all_day_complete && ctx.total_items > 0 {
        return NotificationPayload {
            title: "All done! 🎉".to_string(),
            body: pick(ALL_DONE_BODIES, rng).to_string(),
        };
    }

    let mut title = None;
    let mut body = None;

    match ctx.completed_since_last.len() {
        0 => {}
        1 => {
            title = Some(format!("{} done!", display(names, &ctx.completed_since_last[0])));
        }
        n @ 2..=3 => {
            title = Some(format!("{n} items done!"));
        }
        n => {
            title = Some(format!("{n} items crushed!"));
        }
    }

    if !ctx.pending.is_empty() {
        let first = display(names, &ctx.pending[0]);
        if title.is_none() {
            title = Some(format!("Time for {first}"));
        }
        if ctx.pending.len() == 1 {
            body = Some(pick(SINGLE_PENDING_NUDGES, rng).replace("{}", first));
        } else {
            let listed = ctx
                .pending
                .iter()
                .map(|id| display(names, id).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            body = Some(pick(ENCOURAGEMENTS, rng).replace("{}", &listed));
        }
    } else if !ctx.upcoming.is_empty() {
        if title.is_none() {
            title = Some(format!("{} complete!", ctx.current_block.label()));
        }
        if let Some(next) = ctx.next_block {
            let preview = ctx
                .upcoming
                .iter()
                .take(2)
                .map(|id| display(names, id).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            body = Some(format!("Coming up ({}): {preview}", next.label().to_lowercase()));
        }
    }

    NotificationPayload {
        title: title.unwrap_or_else(|| "Evening check-in".to_string()),
        body: body.unwrap_or_else(|| pick(CHECK_IN_BODIES, rng).to_string()),
    }
}

/// The degraded payload sent when context inputs cannot be read.
pub fn generic_check_in() -> NotificationPayload {
    NotificationPayload {
        title: "Habit check-in".to_string(),
        body: "Take a moment to check in on today's habits.".to_string(),
    }
}

fn display<'a>(names: &'a HashMap<String, String>, id: &'a str) -> &'a str {
    names.get(id).map(String::as_str).unwrap_or(id)
}

fn pick<'a>(pool: &[&'a str], rng: &mut impl Rng) -> &'a str {
    // Pools are non-empty constants.
    pool.choose(rng).copied().unwrap_or(pool[0])
}

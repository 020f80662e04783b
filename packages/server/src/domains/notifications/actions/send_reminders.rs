//! Event reminder sweep.
//!
//! Run periodically by the scheduler. Every participant still `registered`
//! for an event starting within the lookahead window gets one
//! `event_reminder` notification, and never a second one for the same
//! event no matter how often the sweep runs.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::domains::events::models::{Event, Participation};
use crate::domains::notifications::models::{
    Notification, NotificationTemplate, NotificationType,
};

pub const REMINDER_LOOKAHEAD_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSweepReport {
    pub events_scanned: usize,
    pub reminders_created: usize,
}

/// The inclusive `[now, now + 24h]` window of events to remind about.
pub fn reminder_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::hours(REMINDER_LOOKAHEAD_HOURS))
}

pub async fn send_event_reminders(pool: &PgPool) -> Result<ReminderSweepReport> {
    send_event_reminders_at(Utc::now(), pool).await
}

/// Sweep as if the current time were `now`.
pub async fn send_event_reminders_at(
    now: DateTime<Utc>,
    pool: &PgPool,
) -> Result<ReminderSweepReport> {
    let (start, end) = reminder_window(now);
    let events = Event::find_between(start, end, pool).await?;

    let mut report = ReminderSweepReport {
        events_scanned: events.len(),
        ..Default::default()
    };

    for event in &events {
        let participants = Participation::registered_user_ids(event.id, pool).await?;
        debug!(
            event_id = %event.id,
            registered = participants.len(),
            "Checking reminders for event"
        );

        let template = NotificationTemplate::event_reminder(event);
        for user_id in participants {
            let already_sent = Notification::exists_for(
                user_id,
                NotificationType::EventReminder,
                event.id.into_uuid(),
                pool,
            )
            .await?;
            if already_sent {
                continue;
            }

            // A concurrent sweep may have inserted between the check and here;
            // the partial unique index turns that into a no-op.
            if Notification::create_reminder_if_absent(user_id, &template, pool)
                .await?
                .is_some()
            {
                report.reminders_created += 1;
            }
        }
    }

    info!(
        events_scanned = report.events_scanned,
        reminders_created = report.reminders_created,
        "Event reminder sweep finished"
    );

    Ok(report)
}

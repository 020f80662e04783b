//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! - Event reminder sweep (hourly by default, `REMINDER_CRON`)
//!
//! The sweep is idempotent, so overlapping or repeated runs never send a
//! second reminder for the same (user, event).

use anyhow::Result;
use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::notifications::actions::send_event_reminders;

/// Start all scheduled tasks
pub async fn start_scheduler(pool: PgPool, reminder_cron: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let reminder_pool = pool.clone();
    let reminder_job = Job::new_async(reminder_cron, move |_uuid, _lock| {
        let pool = reminder_pool.clone();
        Box::pin(async move {
            if let Err(e) = run_reminder_sweep(&pool).await {
                tracing::error!("Event reminder sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(reminder_job).await?;
    scheduler.start().await?;

    tracing::info!(cron = %reminder_cron, "Scheduled tasks started (event reminders)");
    Ok(scheduler)
}

async fn run_reminder_sweep(pool: &PgPool) -> Result<()> {
    tracing::info!("Running event reminder sweep");

    let report = send_event_reminders(pool).await?;

    if report.reminders_created == 0 {
        tracing::debug!(
            events_scanned = report.events_scanned,
            "No new reminders to send"
        );
    }

    Ok(())
}

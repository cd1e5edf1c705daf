//! Background scheduler for the daily sweep.
//!
//! Fires once per calendar day shortly after midnight local time, matching
//! the original cron slot. Fire-and-forget: a failed run is logged and left
//! for the next day, never retried mid-cycle.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Local};
use log::info;

use crate::goals::GoalRepositoryTrait;
use crate::users::UserRepositoryTrait;

use super::sweep_service::SweepService;

/// Local time of day the sweep runs at: 00:01.
const SWEEP_HOUR: u32 = 0;
const SWEEP_MINUTE: u32 = 1;

/// Starts the daily sweep scheduler on the tokio runtime.
pub fn start_daily_sweep_scheduler<G, U>(sweep: Arc<SweepService<G, U>>)
where
    G: GoalRepositoryTrait + 'static,
    U: UserRepositoryTrait + 'static,
{
    tokio::spawn(async move {
        info!(
            "Daily sweep scheduler started (runs at {:02}:{:02} local time)",
            SWEEP_HOUR, SWEEP_MINUTE
        );

        loop {
            let delay = duration_until_next_run(Local::now());
            tokio::time::sleep(delay).await;

            let outcome = sweep.run();
            info!(
                "Daily sweep finished: {} goals updated, {} stale accounts removed",
                outcome.goals_updated, outcome.accounts_reaped
            );
        }
    });
}

/// Time remaining until the next scheduled run after `now`.
fn duration_until_next_run(now: DateTime<Local>) -> std::time::Duration {
    let now = now.naive_local();
    let run_today = now
        .date()
        .and_hms_opt(SWEEP_HOUR, SWEEP_MINUTE, 0)
        .expect("sweep time of day is valid");

    let next_run = if now < run_today {
        run_today
    } else {
        run_today + ChronoDuration::days(1)
    };

    (next_run - now).to_std().unwrap_or_default()
}

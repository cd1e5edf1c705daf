use std::sync::Arc;

use chrono::Duration;
use log::{error, info};

use crate::goals::GoalRepositoryTrait;
use crate::users::UserRepositoryTrait;

use super::clock::Clock;

/// Unverified signups older than this many days are deleted by the sweep.
pub const STALE_SIGNUP_RETENTION_DAYS: i64 = 5;

/// What a single sweep run accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOutcome {
    pub goals_updated: usize,
    pub accounts_reaped: usize,
}

/// The daily batch job: recompute which goals are due for a check-in, then
/// reap stale unverified signups. Each half logs and swallows its own
/// failures; the next day's run is self-correcting because the eligibility
/// update is idempotent and the reaper re-queries liveness.
pub struct SweepService<G, U>
where
    G: GoalRepositoryTrait,
    U: UserRepositoryTrait,
{
    goal_repo: Arc<G>,
    user_repo: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<G, U> SweepService<G, U>
where
    G: GoalRepositoryTrait,
    U: UserRepositoryTrait,
{
    pub fn new(goal_repo: Arc<G>, user_repo: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        SweepService {
            goal_repo,
            user_repo,
            clock,
        }
    }

    pub fn run(&self) -> SweepOutcome {
        let today = self.clock.today();

        let goals_updated = match self.goal_repo.recompute_eligibility(today) {
            Ok(count) => {
                info!("Eligibility sweep for {} touched {} goals", today, count);
                count
            }
            Err(e) => {
                error!("Eligibility sweep for {} failed: {}", today, e);
                0
            }
        };

        let cutoff = self.clock.now() - Duration::days(STALE_SIGNUP_RETENTION_DAYS);
        let accounts_reaped = match self.user_repo.delete_stale_unverified(cutoff) {
            Ok(count) => {
                if count > 0 {
                    info!("Reaped {} unverified accounts older than {}", count, cutoff);
                }
                count
            }
            Err(e) => {
                error!("Stale signup reaper failed: {}", e);
                0
            }
        };

        SweepOutcome {
            goals_updated,
            accounts_reaped,
        }
    }
}

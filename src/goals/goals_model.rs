use std::fmt;

use chrono::{Duration, NaiveDate};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::goals_errors::{GoalError, Result};

/// The central temporal entity: an accountability goal with a recurring
/// check-in cycle.
///
/// `can_check_in` is a derived flag: it is true exactly when the goal is
/// neither paused nor achieved and `next_check_in` has arrived. Only the
/// eligibility sweep, the pause/unpause transition, the achieve transition
/// and the post-check-in reset write it.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub creator_id: String,
    pub template_id: String,
    pub group_id: Option<String>,
    pub goal_name: String,
    pub start_date: NaiveDate,
    /// Length of one cycle, in days. Always positive.
    pub check_in_period: i32,
    pub next_check_in: NaiveDate,
    /// Count of completed cycles, starting at 0.
    pub check_in_num: i32,
    pub can_check_in: bool,
    pub is_paused: bool,
    pub is_achieved: bool,
    /// Visibility only; orthogonal to the lifecycle.
    pub is_public: bool,
}

/// Lifecycle state, derived from the persisted flags.
///
/// ```text
/// ActiveWaiting --sweep, date reached--> ActiveDue
/// ActiveDue --check-in submitted--> ActiveWaiting
/// ActiveWaiting | ActiveDue --pause--> Paused
/// Paused --unpause--> ActiveWaiting | ActiveDue  (re-derived from the date)
/// any non-achieved --achieve--> Achieved          (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalState {
    ActiveWaiting,
    ActiveDue,
    Paused,
    Achieved,
}

impl fmt::Display for GoalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalState::ActiveWaiting => write!(f, "active_waiting"),
            GoalState::ActiveDue => write!(f, "active_due"),
            GoalState::Paused => write!(f, "paused"),
            GoalState::Achieved => write!(f, "achieved"),
        }
    }
}

impl Goal {
    pub fn state(&self) -> GoalState {
        if self.is_achieved {
            GoalState::Achieved
        } else if self.is_paused {
            GoalState::Paused
        } else if self.can_check_in {
            GoalState::ActiveDue
        } else {
            GoalState::ActiveWaiting
        }
    }

    /// Whether the sweep would flag this goal as due on `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        !self.is_paused && !self.is_achieved && self.next_check_in <= today
    }

    /// The cycle number a check-in submitted now would complete.
    pub fn current_cycle(&self) -> i32 {
        self.check_in_num + 1
    }

    /// The due date one period after `completed_on`.
    pub fn next_due_after(&self, completed_on: NaiveDate) -> NaiveDate {
        completed_on + Duration::days(self.check_in_period as i64)
    }
}

/// Input model for creating a new goal.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub goal_name: String,
    pub template_id: String,
    /// Days between check-ins.
    pub check_in_period: i32,
    pub is_public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<()> {
        if self.goal_name.trim().is_empty() {
            return Err(GoalError::InvalidData(
                "Goal name cannot be empty".to_string(),
            ));
        }
        if self.template_id.trim().is_empty() {
            return Err(GoalError::InvalidData(
                "A goal needs a template".to_string(),
            ));
        }
        if self.check_in_period <= 0 {
            return Err(GoalError::InvalidData(format!(
                "Check-in period must be positive, got {}",
                self.check_in_period
            )));
        }
        Ok(())
    }
}

use chrono::NaiveDate;

use super::checkins_errors::Result;
use super::checkins_model::{CheckInSubmission, Response};
use crate::goals::Goal;
use crate::templates::Question;

/// Trait for check-in repository operations
pub trait CheckInRepositoryTrait: Send + Sync {
    /// Records a validated batch and advances the goal's cycle in one
    /// transaction. `expected_cycle` is re-checked against the row inside
    /// the transaction so two concurrent submissions cannot both advance
    /// the counter. Returns the advanced goal.
    fn record_check_in(
        &self,
        goal_id: &str,
        expected_cycle: i32,
        next_due: NaiveDate,
        responses: Vec<Response>,
    ) -> Result<Goal>;

    fn load_responses(&self, goal_id: &str) -> Result<Vec<Response>>;
}

/// Trait for check-in service operations
pub trait CheckInServiceTrait: Send + Sync {
    fn submit_check_in(&self, actor_id: &str, submission: CheckInSubmission) -> Result<Goal>;
    /// Questions for the goal's current cycle, in template order.
    fn get_check_in_questions(&self, actor_id: &str, goal_id: &str) -> Result<Vec<Question>>;
    fn get_responses(&self, actor_id: &str, goal_id: &str) -> Result<Vec<Response>>;
}

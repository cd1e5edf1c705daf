use chrono::NaiveDate;

use super::goals_errors::Result;
use super::goals_model::{Goal, NewGoal};

/// Trait for goal repository operations
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_by_id(&self, goal_id: &str) -> Result<Goal>;
    fn load_goals(&self, owner_id: &str) -> Result<Vec<Goal>>;
    /// Goals of `owner_id` currently flagged due (`can_check_in = true`).
    fn list_due_goals(&self, owner_id: &str) -> Result<Vec<Goal>>;
    fn insert_new_goal(&self, goal: Goal) -> Result<Goal>;
    fn delete_goal(&self, goal_id: &str) -> Result<usize>;
    /// Pause or unpause as one atomic update. Unpausing re-derives
    /// `can_check_in` from the date comparison inside the same statement.
    fn set_pause_state(&self, goal_id: &str, paused: bool, today: NaiveDate) -> Result<Goal>;
    /// Marks the goal achieved and clears its due flag. Terminal.
    fn set_achieved(&self, goal_id: &str) -> Result<Goal>;
    /// The daily eligibility sweep: for every non-paused, non-achieved goal,
    /// `can_check_in := (next_check_in <= today)`. Idempotent; touches no
    /// other column. Returns the number of rows updated.
    fn recompute_eligibility(&self, today: NaiveDate) -> Result<usize>;
}

/// Trait for goal service operations
pub trait GoalServiceTrait: Send + Sync {
    fn create_goal(&self, actor_id: &str, new_goal: NewGoal) -> Result<Goal>;
    fn get_goal(&self, actor_id: &str, goal_id: &str) -> Result<Goal>;
    fn get_goals(&self, actor_id: &str) -> Result<Vec<Goal>>;
    fn list_due_goals(&self, actor_id: &str) -> Result<Vec<Goal>>;
    fn set_paused(&self, actor_id: &str, goal_id: &str, paused: bool) -> Result<Goal>;
    fn achieve_goal(&self, actor_id: &str, goal_id: &str) -> Result<Goal>;
    fn delete_goal(&self, actor_id: &str, goal_id: &str) -> Result<usize>;
}

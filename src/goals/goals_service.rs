use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::sweep::Clock;

use super::goals_errors::{GoalError, Result};
use super::goals_model::{Goal, GoalState, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};

pub struct GoalService<T: GoalRepositoryTrait> {
    goal_repo: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<T: GoalRepositoryTrait> GoalService<T> {
    pub fn new(goal_repo: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        GoalService { goal_repo, clock }
    }

    fn owned_goal(&self, actor_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self.goal_repo.get_by_id(goal_id)?;
        if goal.creator_id != actor_id {
            return Err(GoalError::Forbidden(format!(
                "Goal {} does not belong to user {}",
                goal_id, actor_id
            )));
        }
        Ok(goal)
    }
}

impl<T: GoalRepositoryTrait> GoalServiceTrait for GoalService<T> {
    fn create_goal(&self, actor_id: &str, new_goal: NewGoal) -> Result<Goal> {
        new_goal.validate()?;

        let today = self.clock.today();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            creator_id: actor_id.to_string(),
            template_id: new_goal.template_id,
            group_id: new_goal.group_id,
            goal_name: new_goal.goal_name,
            start_date: today,
            check_in_period: new_goal.check_in_period,
            next_check_in: today + chrono::Duration::days(new_goal.check_in_period as i64),
            check_in_num: 0,
            can_check_in: false,
            is_paused: false,
            is_achieved: false,
            is_public: new_goal.is_public,
        };

        debug!(
            "Creating goal '{}' for user {}, first check-in {}",
            goal.goal_name, actor_id, goal.next_check_in
        );
        self.goal_repo.insert_new_goal(goal)
    }

    fn get_goal(&self, actor_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self.goal_repo.get_by_id(goal_id)?;
        if goal.creator_id != actor_id && !goal.is_public {
            return Err(GoalError::Forbidden(format!(
                "Goal {} is not visible to user {}",
                goal_id, actor_id
            )));
        }
        Ok(goal)
    }

    fn get_goals(&self, actor_id: &str) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals(actor_id)
    }

    fn list_due_goals(&self, actor_id: &str) -> Result<Vec<Goal>> {
        self.goal_repo.list_due_goals(actor_id)
    }

    fn set_paused(&self, actor_id: &str, goal_id: &str, paused: bool) -> Result<Goal> {
        let goal = self.owned_goal(actor_id, goal_id)?;

        if goal.state() == GoalState::Achieved {
            return Err(GoalError::Conflict(format!(
                "Goal {} is achieved and can no longer be paused or resumed",
                goal_id
            )));
        }
        if goal.is_paused == paused {
            return Ok(goal);
        }

        self.goal_repo
            .set_pause_state(goal_id, paused, self.clock.today())
    }

    fn achieve_goal(&self, actor_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self.owned_goal(actor_id, goal_id)?;

        if goal.is_achieved {
            return Err(GoalError::Conflict(format!(
                "Goal {} is already achieved",
                goal_id
            )));
        }

        self.goal_repo.set_achieved(goal_id)
    }

    fn delete_goal(&self, actor_id: &str, goal_id: &str) -> Result<usize> {
        self.owned_goal(actor_id, goal_id)?;
        self.goal_repo.delete_goal(goal_id)
    }
}

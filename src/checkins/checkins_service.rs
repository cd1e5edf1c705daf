use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use crate::goals::{Goal, GoalRepositoryTrait};
use crate::sweep::Clock;
use crate::templates::{Question, TemplateRepositoryTrait};

use super::checkins_errors::{CheckInError, Result};
use super::checkins_model::{CheckInSubmission, Response};
use super::checkins_traits::{CheckInRepositoryTrait, CheckInServiceTrait};

pub struct CheckInService<G, T, C>
where
    G: GoalRepositoryTrait,
    T: TemplateRepositoryTrait,
    C: CheckInRepositoryTrait,
{
    goal_repo: Arc<G>,
    template_repo: Arc<T>,
    checkin_repo: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<G, T, C> CheckInService<G, T, C>
where
    G: GoalRepositoryTrait,
    T: TemplateRepositoryTrait,
    C: CheckInRepositoryTrait,
{
    pub fn new(
        goal_repo: Arc<G>,
        template_repo: Arc<T>,
        checkin_repo: Arc<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        CheckInService {
            goal_repo,
            template_repo,
            checkin_repo,
            clock,
        }
    }

    fn visible_goal(&self, actor_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self.goal_repo.get_by_id(goal_id)?;
        if goal.creator_id != actor_id && !goal.is_public {
            return Err(CheckInError::Forbidden(format!(
                "Goal {} is not visible to user {}",
                goal_id, actor_id
            )));
        }
        Ok(goal)
    }
}

impl<G, T, C> CheckInServiceTrait for CheckInService<G, T, C>
where
    G: GoalRepositoryTrait,
    T: TemplateRepositoryTrait,
    C: CheckInRepositoryTrait,
{
    fn submit_check_in(&self, actor_id: &str, submission: CheckInSubmission) -> Result<Goal> {
        let goal = self.goal_repo.get_by_id(&submission.goal_id)?;
        if goal.creator_id != actor_id {
            return Err(CheckInError::Forbidden(format!(
                "Goal {} does not belong to user {}",
                goal.id, actor_id
            )));
        }

        if goal.is_achieved {
            return Err(CheckInError::Conflict(format!(
                "Goal {} is achieved and no longer accepts check-ins",
                goal.id
            )));
        }
        // Covers paused goals too: pausing always clears the due flag.
        if !goal.can_check_in {
            return Err(CheckInError::Conflict(format!(
                "Goal {} is not due for a check-in",
                goal.id
            )));
        }

        if submission.answers.is_empty() {
            return Err(CheckInError::InvalidData(
                "A check-in needs at least one answer".to_string(),
            ));
        }

        // Every referenced question must belong to the goal's template;
        // a single unknown id rejects the whole batch before any write.
        let questions = self.template_repo.load_questions(&goal.template_id)?;
        let known_ids: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        for answer in &submission.answers {
            if !known_ids.contains(answer.question_id.as_str()) {
                return Err(CheckInError::InvalidData(format!(
                    "Question {} does not belong to the goal's template",
                    answer.question_id
                )));
            }
        }

        let cycle = goal.current_cycle();
        let today = self.clock.today();
        let next_due = goal.next_due_after(today);

        let response_rows: Vec<Response> = submission
            .answers
            .into_iter()
            .map(|answer| Response {
                id: Uuid::new_v4().to_string(),
                goal_id: goal.id.clone(),
                question_id: answer.question_id,
                text: answer.text,
                check_in_number: cycle,
            })
            .collect();

        debug!(
            "Recording check-in cycle {} for goal {} ({} answers)",
            cycle,
            goal.id,
            response_rows.len()
        );
        let updated = self
            .checkin_repo
            .record_check_in(&goal.id, cycle, next_due, response_rows)?;

        info!(
            "Goal {} completed cycle {}, next check-in {}",
            updated.id, updated.check_in_num, updated.next_check_in
        );
        Ok(updated)
    }

    fn get_check_in_questions(&self, actor_id: &str, goal_id: &str) -> Result<Vec<Question>> {
        let goal = self.visible_goal(actor_id, goal_id)?;
        Ok(self
            .template_repo
            .questions_for_cycle(&goal.template_id, goal.current_cycle())?)
    }

    fn get_responses(&self, actor_id: &str, goal_id: &str) -> Result<Vec<Response>> {
        let goal = self.visible_goal(actor_id, goal_id)?;
        self.checkin_repo.load_responses(&goal.id)
    }
}

use std::sync::Arc;

use chrono::NaiveDate;
use diesel::prelude::*;
use log::debug;

use crate::db::{DbConnection, DbPool};
use crate::schema::goals;
use crate::schema::goals::dsl::*;

use super::goals_errors::{GoalError, Result};
use super::goals_model::Goal;
use super::goals_traits::GoalRepositoryTrait;

pub struct GoalRepository {
    pool: Arc<DbPool>,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        GoalRepository { pool }
    }

    fn conn(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .map_err(|e| GoalError::DatabaseError(e.to_string()))
    }
}

impl GoalRepositoryTrait for GoalRepository {
    fn get_by_id(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = self.conn()?;
        Ok(goals.find(goal_id).first(&mut conn)?)
    }

    fn load_goals(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let mut conn = self.conn()?;
        Ok(goals
            .filter(creator_id.eq(owner_id))
            .order(start_date.asc())
            .load::<Goal>(&mut conn)?)
    }

    fn list_due_goals(&self, owner_id: &str) -> Result<Vec<Goal>> {
        let mut conn = self.conn()?;
        Ok(goals
            .filter(creator_id.eq(owner_id))
            .filter(can_check_in.eq(true))
            .order(next_check_in.asc())
            .load::<Goal>(&mut conn)?)
    }

    fn insert_new_goal(&self, goal: Goal) -> Result<Goal> {
        let mut conn = self.conn()?;
        Ok(diesel::insert_into(goals::table)
            .values(&goal)
            .returning(goals::all_columns)
            .get_result(&mut conn)?)
    }

    fn delete_goal(&self, goal_id: &str) -> Result<usize> {
        let mut conn = self.conn()?;
        Ok(diesel::delete(goals.find(goal_id)).execute(&mut conn)?)
    }

    fn set_pause_state(&self, goal_id: &str, paused: bool, today: NaiveDate) -> Result<Goal> {
        let mut conn = self.conn()?;

        if paused {
            diesel::update(goals.find(goal_id))
                .set((is_paused.eq(true), can_check_in.eq(false)))
                .execute(&mut conn)?;
        } else {
            // Unpause re-derives the due flag from the date comparison in the
            // same statement; it is never blindly re-enabled.
            diesel::update(goals.find(goal_id))
                .set((is_paused.eq(false), can_check_in.eq(next_check_in.le(today))))
                .execute(&mut conn)?;
        }

        Ok(goals.find(goal_id).first(&mut conn)?)
    }

    fn set_achieved(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = self.conn()?;

        diesel::update(goals.find(goal_id))
            .set((is_achieved.eq(true), can_check_in.eq(false)))
            .execute(&mut conn)?;

        Ok(goals.find(goal_id).first(&mut conn)?)
    }

    fn recompute_eligibility(&self, today: NaiveDate) -> Result<usize> {
        let mut conn = self.conn()?;

        let updated = diesel::update(
            goals
                .filter(is_paused.eq(false))
                .filter(is_achieved.eq(false)),
        )
        .set(can_check_in.eq(next_check_in.le(today)))
        .execute(&mut conn)?;

        debug!("Eligibility recomputed for {} goals", updated);
        Ok(updated)
    }
}

use std::sync::Arc;

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::db::{DbConnection, DbPool};
use crate::goals::Goal;
use crate::schema::{goals, responses};

use super::checkins_errors::{CheckInError, Result};
use super::checkins_model::Response;
use super::checkins_traits::CheckInRepositoryTrait;

pub struct CheckInRepository {
    pool: Arc<DbPool>,
}

impl CheckInRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        CheckInRepository { pool }
    }

    fn conn(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .map_err(|e| CheckInError::DatabaseError(e.to_string()))
    }
}

impl CheckInRepositoryTrait for CheckInRepository {
    fn record_check_in(
        &self,
        goal_id: &str,
        expected_cycle: i32,
        next_due: NaiveDate,
        response_rows: Vec<Response>,
    ) -> Result<Goal> {
        let mut conn = self.conn()?;

        conn.transaction::<Goal, CheckInError, _>(|conn| {
            // Re-read the row inside the transaction: if another submission
            // already completed this cycle, the whole batch rolls back.
            let goal: Goal = goals::table.find(goal_id).first(conn)?;
            if goal.is_achieved {
                return Err(CheckInError::Conflict(format!(
                    "Goal {} is achieved and no longer accepts check-ins",
                    goal_id
                )));
            }
            if !goal.can_check_in || goal.check_in_num + 1 != expected_cycle {
                return Err(CheckInError::Conflict(format!(
                    "Goal {} is not due for cycle {}",
                    goal_id, expected_cycle
                )));
            }

            diesel::insert_into(responses::table)
                .values(&response_rows)
                .execute(conn)?;

            diesel::update(goals::table.find(goal_id))
                .set((
                    goals::check_in_num.eq(expected_cycle),
                    goals::next_check_in.eq(next_due),
                    goals::can_check_in.eq(false),
                ))
                .execute(conn)?;

            Ok(goals::table.find(goal_id).first(conn)?)
        })
    }

    fn load_responses(&self, goal_id: &str) -> Result<Vec<Response>> {
        let mut conn = self.conn()?;
        Ok(responses::table
            .filter(responses::goal_id.eq(goal_id))
            .order(responses::check_in_number.asc())
            .load::<Response>(&mut conn)?)
    }
}
